//! Single-player drawing challenge and the training-data variant.

use crate::model::Challenge;
use crate::protocol::{ClientEvent, Reply, ServerEvent};
use crate::state::strokes::StrokeRecorder;
use crate::state::Controller;
use crate::surface::{DrawSurface, Point};
use crate::util::cwarn;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoloMode {
    /// Scored practice.
    Game,
    /// Drawings are collected for the classifier; no result comes back.
    Training,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoloPhase {
    AwaitingChallenge,
    Drawing,
    Submitted,
    Resolved,
    Blocked,
}

/// What the classifier said about an incorrect drawing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Feedback {
    pub mistaken_for: Vec<String>,
    pub incorrect_strokes: Vec<u32>,
    pub animation_url: Option<String>,
}

#[derive(Clone, Debug)]
pub struct SoloChallenge {
    mode: SoloMode,
    phase: SoloPhase,
    challenge: Option<Challenge>,
    strokes: StrokeRecorder,
    score: i64,
    last_result: Option<bool>,
    feedback: Option<Feedback>,
    submitted_count: u32,
    canvas_epoch: u32,
}

impl SoloChallenge {
    pub fn new(mode: SoloMode) -> Self {
        Self {
            mode,
            phase: SoloPhase::AwaitingChallenge,
            challenge: None,
            strokes: StrokeRecorder::default(),
            score: 0,
            last_result: None,
            feedback: None,
            submitted_count: 0,
            canvas_epoch: 0,
        }
    }

    pub fn mode(&self) -> SoloMode {
        self.mode
    }

    pub fn phase(&self) -> SoloPhase {
        self.phase
    }

    pub fn challenge(&self) -> Option<&Challenge> {
        self.challenge.as_ref()
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn last_result(&self) -> Option<bool> {
        self.last_result
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// Drawings handed in this session (training page counter).
    pub fn submitted_count(&self) -> u32 {
        self.submitted_count
    }

    pub fn strokes(&self) -> &StrokeRecorder {
        &self.strokes
    }

    pub fn canvas_epoch(&self) -> u32 {
        self.canvas_epoch
    }

    pub fn pointer_down(&mut self, at: Point) {
        if self.phase == SoloPhase::Drawing {
            self.strokes.begin(at);
        }
    }

    pub fn pointer_move(&mut self, at: Point, surface: &dyn DrawSurface) {
        self.strokes.extend(at, surface);
    }

    pub fn pointer_up(&mut self, surface: &dyn DrawSurface) {
        self.strokes.finish(surface);
    }

    pub fn clear(&mut self) {
        if self.phase == SoloPhase::Drawing {
            self.strokes.reset();
            self.canvas_epoch += 1;
        }
    }

    pub fn submit(&mut self) -> Vec<Reply> {
        if self.phase != SoloPhase::Drawing || self.strokes.is_empty() {
            return Vec::new();
        }
        let Some(challenge) = self.challenge.as_ref() else {
            return Vec::new();
        };
        let image_data = match self.strokes.to_payload() {
            Ok(payload) => payload,
            Err(err) => {
                cwarn(&format!("failed to encode strokes: {err}"));
                return Vec::new();
            }
        };
        let sound_num = challenge.sound_num;
        self.submitted_count += 1;
        match self.mode {
            SoloMode::Game => {
                self.phase = SoloPhase::Submitted;
                vec![Reply::send(ClientEvent::ImageSubmitSingle { image_data, sound_num })]
            }
            SoloMode::Training => {
                self.phase = SoloPhase::AwaitingChallenge;
                vec![
                    Reply::send(ClientEvent::ImageSubmitTrain { image_data, sound_num }),
                    Reply::send(ClientEvent::AskForChallenge),
                ]
            }
        }
    }

    /// Moves on from a resolved challenge.
    pub fn next(&mut self) -> Vec<Reply> {
        if self.phase != SoloPhase::Resolved {
            return Vec::new();
        }
        self.phase = SoloPhase::AwaitingChallenge;
        vec![Reply::send(ClientEvent::AskForChallenge)]
    }
}

impl Controller for SoloChallenge {
    fn on_open(&mut self) -> Vec<Reply> {
        vec![Reply::send(ClientEvent::CheckAllowed), Reply::send(ClientEvent::AskForChallenge)]
    }

    fn on_event(&mut self, event: ServerEvent) -> Vec<Reply> {
        if self.phase == SoloPhase::Blocked {
            return Vec::new();
        }
        match event {
            ServerEvent::AllowedCheck { allowed: false } => {
                self.phase = SoloPhase::Blocked;
            }
            ServerEvent::RecvChallenge(challenge) => {
                self.strokes.reset();
                self.canvas_epoch += 1;
                self.challenge = Some(challenge);
                self.last_result = None;
                self.feedback = None;
                self.phase = SoloPhase::Drawing;
            }
            ServerEvent::ResultSingle { result, points, mistaken_for, incorrect_strokes, char_animation } => {
                if self.phase != SoloPhase::Submitted {
                    return Vec::new();
                }
                self.last_result = Some(result);
                if result {
                    self.score += points;
                    self.feedback = None;
                } else {
                    self.feedback = Some(Feedback {
                        mistaken_for,
                        incorrect_strokes,
                        animation_url: char_animation,
                    });
                }
                self.phase = SoloPhase::Resolved;
            }
            _ => {}
        }
        Vec::new()
    }
}
