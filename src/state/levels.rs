use crate::model::{LevelChar, LevelContent};
use crate::protocol::{ClientEvent, Reply, ServerEvent};
use crate::state::Controller;

/// A character taught by a level with its media.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonCard {
    pub sound: String,
    pub kana: String,
    pub audio_url: Option<String>,
    pub animation_url: Option<String>,
}

#[derive(Clone, Debug)]
pub struct LevelLesson {
    level: u32,
    points: i64,
    paragraphs: Vec<String>,
    cards: Vec<LessonCard>,
    loaded: bool,
    finished: bool,
}

impl LevelLesson {
    pub fn new(level: u32) -> Self {
        Self {
            level,
            points: 0,
            paragraphs: Vec::new(),
            cards: Vec::new(),
            loaded: false,
            finished: false,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn points(&self) -> i64 {
        self.points
    }

    pub fn paragraphs(&self) -> &[String] {
        &self.paragraphs
    }

    pub fn cards(&self) -> &[LessonCard] {
        &self.cards
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn finish(&mut self) -> Vec<Reply> {
        if !self.loaded || self.finished {
            return Vec::new();
        }
        self.finished = true;
        vec![Reply::send(ClientEvent::FinishedLevel { level_num: self.level })]
    }

    fn load(&mut self, content: LevelContent) {
        let LevelContent { points, paragraphs, char_list, char_audios, animations } = content;
        let mut audios = char_audios.into_iter();
        let mut gifs = animations.into_iter();
        self.cards = char_list
            .into_iter()
            .map(|LevelChar(sound, kana)| LessonCard {
                sound,
                kana,
                audio_url: audios.next(),
                animation_url: gifs.next(),
            })
            .collect();
        self.points = points;
        self.paragraphs = paragraphs.into_iter().filter(|p| !p.trim().is_empty()).collect();
        self.loaded = true;
    }
}

impl Controller for LevelLesson {
    fn on_open(&mut self) -> Vec<Reply> {
        vec![Reply::send(ClientEvent::GetLevelData { level_num: self.level })]
    }

    fn on_event(&mut self, event: ServerEvent) -> Vec<Reply> {
        if let ServerEvent::LevelData(content) = event {
            self.load(content);
        }
        Vec::new()
    }
}
