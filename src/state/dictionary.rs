use crate::model::DictionaryEntry;
use crate::protocol::{ClientEvent, Reply, ServerEvent};
use crate::state::Controller;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DictionaryRow {
    pub reading: String,
    pub meanings: String,
    /// Alternative readings; empty when the word has none.
    pub other_readings: String,
}

impl From<DictionaryEntry> for DictionaryRow {
    fn from(entry: DictionaryEntry) -> Self {
        let others: Vec<String> = entry.readings.into_iter().flatten().collect();
        Self {
            reading: entry.primary_reading,
            meanings: entry.meanings.join("; "),
            other_readings: others.join(", "),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct DictionarySearch {
    last_term: Option<String>,
    rows: Vec<DictionaryRow>,
}

impl DictionarySearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[DictionaryRow] {
        &self.rows
    }

    pub fn last_term(&self) -> Option<&str> {
        self.last_term.as_deref()
    }

    /// True once a search has come back without matches.
    pub fn nothing_found(&self) -> bool {
        self.last_term.is_some() && self.rows.is_empty()
    }

    pub fn search(&mut self, term: &str) -> Vec<Reply> {
        let term = term.trim();
        if term.is_empty() {
            return Vec::new();
        }
        self.last_term = Some(term.to_owned());
        vec![Reply::send(ClientEvent::SearchDictionary { search_term: term.to_owned() })]
    }
}

impl Controller for DictionarySearch {
    fn on_open(&mut self) -> Vec<Reply> {
        Vec::new()
    }

    fn on_event(&mut self, event: ServerEvent) -> Vec<Reply> {
        if let ServerEvent::DictionaryResults { results } = event {
            self.rows = results.into_iter().map(DictionaryRow::from).collect();
        }
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(reading: &str, meanings: &[&str], readings: Vec<Option<&str>>) -> DictionaryEntry {
        DictionaryEntry {
            primary_reading: reading.into(),
            meanings: meanings.iter().map(|m| m.to_string()).collect(),
            readings: readings.into_iter().map(|r| r.map(str::to_owned)).collect(),
        }
    }

    #[test]
    fn search_sends_trimmed_term() {
        let mut dict = DictionarySearch::new();
        assert_eq!(
            dict.search(" neko "),
            vec![Reply::send(ClientEvent::SearchDictionary { search_term: "neko".into() })]
        );
        assert!(dict.search("  ").is_empty());
        assert_eq!(dict.last_term(), Some("neko"));
    }

    #[test]
    fn results_rebuild_the_table() {
        let mut dict = DictionarySearch::new();
        dict.search("nihon");
        dict.on_event(ServerEvent::DictionaryResults {
            results: vec![
                entry("にほんご", &["Japanese (language)"], vec![Some("にっぽんご")]),
                entry("ねこ", &["cat", "shamisen"], vec![None]),
            ],
        });
        assert_eq!(dict.rows().len(), 2);
        assert_eq!(dict.rows()[0].other_readings, "にっぽんご");
        assert_eq!(dict.rows()[1].meanings, "cat; shamisen");
        assert_eq!(dict.rows()[1].other_readings, "");

        dict.on_event(ServerEvent::DictionaryResults { results: vec![] });
        assert!(dict.nothing_found());
    }
}
