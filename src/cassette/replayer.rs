//! Replays recorded interactions from a cassette.

use std::collections::HashMap;

use super::format::{Cassette, Interaction};

/// Key for indexing interactions by port and method.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct PortMethodKey {
    port: String,
    method: String,
}

/// Replays interactions from a loaded cassette, serving them sequentially
/// per port/method pair.
pub struct CassetteReplayer {
    /// Per port+method queue of interactions (in order).
    queues: HashMap<PortMethodKey, Vec<Interaction>>,
    /// Per port+method cursor tracking position.
    cursors: HashMap<PortMethodKey, usize>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<PortMethodKey, Vec<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            let key = PortMethodKey {
                port: interaction.port.clone(),
                method: interaction.method.clone(),
            };
            queues.entry(key).or_default().push(interaction.clone());
        }
        let cursors = queues.keys().map(|k| (k.clone(), 0)).collect();
        Self { queues, cursors }
    }

    /// Return the next interaction for the given port and method.
    ///
    /// # Errors
    ///
    /// Returns a descriptive message if the cassette has no (more)
    /// interactions for the given port/method combination, showing what was
    /// requested versus what the cassette holds.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> Result<&Interaction, String> {
        let key = PortMethodKey { port: port.to_string(), method: method.to_string() };

        let Some(queue) = self.queues.get(&key) else {
            let mut available: Vec<String> =
                self.queues.keys().map(|k| format!("{}::{}", k.port, k.method)).collect();
            available.sort();
            return Err(format!(
                "Cassette exhausted: no interactions recorded for port={port:?} method={method:?}. \
                 Available port::method pairs: [{}]",
                available.join(", ")
            ));
        };

        let cursor = self.cursors.entry(key).or_insert(0);
        if *cursor >= queue.len() {
            return Err(format!(
                "Cassette exhausted: all {count} interactions for port={port:?} method={method:?} \
                 have been consumed. Last interaction was seq={last_seq}.",
                count = queue.len(),
                last_seq = queue.last().map_or(0, |i| i.seq),
            ));
        }

        let interaction = &queue[*cursor];
        *cursor += 1;
        Ok(interaction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn make_cassette(interactions: Vec<Interaction>) -> Cassette {
        Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            tool_version: "0.0.0".into(),
            interactions,
        }
    }

    fn http_get(seq: u64, url: &str, status: &str) -> Interaction {
        Interaction {
            seq,
            port: "http".into(),
            method: "get".into(),
            input: json!({"url": url}),
            output: json!({"Ok": {"status": 200, "body": status}}),
        }
    }

    #[test]
    fn replay_interleaved_ports_in_order() {
        let cassette = make_cassette(vec![
            Interaction {
                seq: 0,
                port: "fs".into(),
                method: "read_to_string".into(),
                input: json!({"path": "report-task.txt"}),
                output: json!({"Ok": "ceTaskUrl=https://x/task"}),
            },
            http_get(1, "https://x/task", "PENDING"),
            http_get(2, "https://x/task", "SUCCESS"),
        ]);

        let mut replayer = CassetteReplayer::new(&cassette);

        let first = replayer.next_interaction("http", "get").unwrap();
        assert_eq!(first.seq, 1);

        let fs = replayer.next_interaction("fs", "read_to_string").unwrap();
        assert_eq!(fs.seq, 0);

        let second = replayer.next_interaction("http", "get").unwrap();
        assert_eq!(second.seq, 2);
        assert_eq!(second.output["Ok"]["body"], json!("SUCCESS"));
    }

    #[test]
    fn exhausted_queue_reports_last_seq() {
        let cassette = make_cassette(vec![http_get(0, "https://x/task", "PENDING")]);

        let mut replayer = CassetteReplayer::new(&cassette);
        assert!(replayer.next_interaction("http", "get").is_ok());
        let err = replayer.next_interaction("http", "get").unwrap_err();
        assert!(err.contains("Cassette exhausted"));
        assert!(err.contains("seq=0"));
    }

    #[test]
    fn unknown_port_lists_available_pairs() {
        let cassette = make_cassette(vec![http_get(0, "https://x/task", "PENDING")]);
        let mut replayer = CassetteReplayer::new(&cassette);
        let err = replayer.next_interaction("fs", "read_to_string").unwrap_err();
        assert!(err.contains("no interactions recorded"));
        assert!(err.contains("http::get"));
    }
}
