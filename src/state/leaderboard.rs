use crate::model::LeaderEntry;
use crate::protocol::{ClientEvent, Reply, ServerEvent};
use crate::state::Controller;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeaderRow {
    pub rank: usize,
    pub username: String,
    pub points: i64,
}

/// Top players by points, shown on the home page.
#[derive(Clone, Debug, Default)]
pub struct Leaderboard {
    rows: Vec<LeaderRow>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[LeaderRow] {
        &self.rows
    }
}

impl Controller for Leaderboard {
    fn on_open(&mut self) -> Vec<Reply> {
        vec![Reply::send(ClientEvent::GetLeaders)]
    }

    fn on_event(&mut self, event: ServerEvent) -> Vec<Reply> {
        if let ServerEvent::Leaderboard { leaders } = event {
            // Already ordered by the server.
            self.rows = leaders
                .into_iter()
                .enumerate()
                .map(|(i, LeaderEntry(username, points))| LeaderRow { rank: i + 1, username, points })
                .collect();
        }
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_start_at_one() {
        let mut board = Leaderboard::new();
        assert_eq!(board.on_open(), vec![Reply::send(ClientEvent::GetLeaders)]);
        board.on_event(ServerEvent::Leaderboard {
            leaders: vec![LeaderEntry("hana".into(), 120), LeaderEntry("sora".into(), 90)],
        });
        assert_eq!(board.rows()[0], LeaderRow { rank: 1, username: "hana".into(), points: 120 });
        assert_eq!(board.rows()[1].rank, 2);

        board.on_event(ServerEvent::Leaderboard { leaders: vec![] });
        assert!(board.rows().is_empty());
    }
}
