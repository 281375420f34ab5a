//! Two-player drawing session.
//!
//! Both players draw the same character; each sees the other's drawing only after
//! submitting their own, and result colours appear once both have submitted.

use crate::model::{Challenge, RoomId, UserId};
use crate::protocol::{ClientEvent, Reply, ServerEvent};
use crate::state::strokes::StrokeRecorder;
use crate::state::Controller;
use crate::surface::{DrawSurface, Point, CORRECT_COLOUR, INCORRECT_COLOUR};
use crate::util::{clog, cwarn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DuelPhase {
    AwaitingPeer,
    Drawing,
    Submitted,
    Resolved,
    /// We are ready and, as far as we know, so is the peer.
    Ready,
    AwaitingPeerReady,
    /// Eligibility check failed; nothing else is accepted.
    Ineligible,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Participant {
    pub id: Option<UserId>,
    pub username: Option<String>,
    pub submitted: bool,
    pub result: Option<bool>,
    pub ready: bool,
    pub score: i64,
}

impl Participant {
    fn reset_round(&mut self) {
        self.submitted = false;
        self.result = None;
        self.ready = false;
    }

    fn background(&self) -> &'static str {
        if self.result == Some(true) { CORRECT_COLOUR } else { INCORRECT_COLOUR }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResultColours {
    pub me: &'static str,
    pub peer: &'static str,
}

#[derive(Clone, Debug)]
pub struct DuelSession {
    room: RoomId,
    wait_probe_ms: u32,
    phase: DuelPhase,
    me: Participant,
    peer: Participant,
    challenge: Option<Challenge>,
    strokes: StrokeRecorder,
    peer_image: Option<String>,
    peer_canvas_visible: bool,
    colours: Option<ResultColours>,
    controls_visible: bool,
    ready_visible: bool,
    /// Bumped whenever the local canvas must be wiped.
    local_epoch: u32,
    /// Bumped whenever the peer canvas must be wiped.
    peer_epoch: u32,
}

impl DuelSession {
    pub fn new(room: RoomId, wait_probe_ms: u32) -> Self {
        Self {
            room,
            wait_probe_ms,
            phase: DuelPhase::AwaitingPeer,
            me: Participant::default(),
            peer: Participant::default(),
            challenge: None,
            strokes: StrokeRecorder::default(),
            peer_image: None,
            peer_canvas_visible: false,
            colours: None,
            controls_visible: true,
            ready_visible: false,
            local_epoch: 0,
            peer_epoch: 0,
        }
    }

    pub fn phase(&self) -> DuelPhase {
        self.phase
    }

    pub fn me(&self) -> &Participant {
        &self.me
    }

    pub fn peer(&self) -> &Participant {
        &self.peer
    }

    pub fn challenge(&self) -> Option<&Challenge> {
        self.challenge.as_ref()
    }

    pub fn prompt(&self) -> String {
        match (&self.phase, &self.challenge) {
            (DuelPhase::Ineligible, _) => "You have not learned any characters yet.".to_string(),
            (DuelPhase::AwaitingPeer, _) => "Waiting for another player...".to_string(),
            (_, Some(ch)) => ch.prompt(),
            (_, None) => "Waiting for a challenge...".to_string(),
        }
    }

    pub fn strokes(&self) -> &StrokeRecorder {
        &self.strokes
    }

    /// The peer's final raster, if one has arrived this round.
    pub fn peer_image(&self) -> Option<&str> {
        self.peer_image.as_deref()
    }

    pub fn peer_canvas_visible(&self) -> bool {
        self.peer_canvas_visible
    }

    pub fn colours(&self) -> Option<ResultColours> {
        self.colours
    }

    pub fn controls_visible(&self) -> bool {
        self.controls_visible
    }

    pub fn ready_visible(&self) -> bool {
        self.ready_visible
    }

    pub fn waiting_overlay(&self) -> bool {
        self.phase == DuelPhase::AwaitingPeer
    }

    pub fn blocked(&self) -> bool {
        self.phase == DuelPhase::Ineligible
    }

    pub fn local_epoch(&self) -> u32 {
        self.local_epoch
    }

    pub fn peer_epoch(&self) -> u32 {
        self.peer_epoch
    }

    fn can_draw(&self) -> bool {
        matches!(self.phase, DuelPhase::AwaitingPeer | DuelPhase::Drawing) && self.controls_visible
    }

    pub fn pointer_down(&mut self, at: Point) {
        if self.can_draw() {
            self.strokes.begin(at);
        }
    }

    pub fn pointer_move(&mut self, at: Point, surface: &dyn DrawSurface) {
        self.strokes.extend(at, surface);
    }

    pub fn pointer_up(&mut self, surface: &dyn DrawSurface) {
        self.strokes.finish(surface);
    }

    /// Wipes the local drawing without submitting it.
    pub fn clear(&mut self) {
        if self.can_draw() {
            self.strokes.reset();
            self.local_epoch += 1;
        }
    }

    pub fn submit(&mut self) -> Vec<Reply> {
        match self.phase {
            DuelPhase::AwaitingPeer => {
                // Not a real submission while alone in the room.
                self.strokes.reset();
                self.local_epoch += 1;
                Vec::new()
            }
            DuelPhase::Drawing => self.submit_drawing(),
            _ => Vec::new(),
        }
    }

    fn submit_drawing(&mut self) -> Vec<Reply> {
        let (Some(user_id), Some(challenge)) = (self.me.id, self.challenge.as_ref()) else {
            return Vec::new();
        };
        if self.strokes.is_empty() {
            return Vec::new();
        }
        let image_data = match self.strokes.to_payload() {
            Ok(payload) => payload,
            Err(err) => {
                cwarn(&format!("failed to encode strokes: {err}"));
                return Vec::new();
            }
        };
        let event = ClientEvent::ImageSubmit {
            user_id,
            image_data,
            room: self.room,
            sound_num: challenge.sound_num,
        };
        self.me.submitted = true;
        self.phase = DuelPhase::Submitted;
        self.controls_visible = false;
        vec![Reply::send(event)]
    }

    pub fn ready(&mut self) -> Vec<Reply> {
        if !self.ready_visible || self.phase != DuelPhase::Resolved {
            return Vec::new();
        }
        let (Some(user_id), Some(other_id)) = (self.me.id, self.peer.id) else {
            return Vec::new();
        };
        self.me.ready = true;
        self.ready_visible = false;
        // Advisory only: the peer's ready may still be in flight.
        let both = self.me.ready && self.peer.ready;
        self.phase = if both { DuelPhase::Ready } else { DuelPhase::AwaitingPeerReady };
        vec![Reply::send(ClientEvent::UserReady { user_id, other_id, both, room: self.room })]
    }

    pub fn leave(&mut self) -> Vec<Reply> {
        vec![Reply::send(ClientEvent::LeaveRoom { room: self.room })]
    }

    fn is_me(&self, id: UserId) -> bool {
        self.me.id == Some(id)
    }

    /// The peer slot for `id`. Rooms hold two players, so the first stranger seen
    /// before `other_connection` is taken as the peer.
    fn peer_for(&mut self, id: UserId) -> Option<&mut Participant> {
        if self.is_me(id) {
            return None;
        }
        match self.peer.id {
            Some(known) if known != id => None,
            Some(_) => Some(&mut self.peer),
            None => {
                clog(&format!("peer {id} seen before other_connection"));
                self.peer.id = Some(id);
                Some(&mut self.peer)
            }
        }
    }

    fn presence_probe(&self) -> Option<ClientEvent> {
        self.me.id.map(|user_id| ClientEvent::Waiting { room: self.room, user_id })
    }

    fn colour_results(&mut self) {
        if !(self.me.submitted && self.peer.submitted) {
            return;
        }
        // A missing result would paint a premature "incorrect"; the pending result
        // triggers this step again when it lands.
        if self.me.result.is_none() || self.peer.result.is_none() {
            return;
        }
        self.colours = Some(ResultColours { me: self.me.background(), peer: self.peer.background() });
        self.peer_canvas_visible = true;
        self.ready_visible = true;
        self.phase = DuelPhase::Resolved;
    }

    fn new_round(&mut self, challenge: Challenge) {
        self.me.reset_round();
        self.peer.reset_round();
        self.strokes.reset();
        self.local_epoch += 1;
        self.peer_epoch += 1;
        self.peer_image = None;
        self.peer_canvas_visible = false;
        self.colours = None;
        self.controls_visible = true;
        self.ready_visible = false;
        self.challenge = Some(challenge);
        self.phase = DuelPhase::Drawing;
    }
}

impl Controller for DuelSession {
    fn on_open(&mut self) -> Vec<Reply> {
        vec![Reply::send(ClientEvent::CheckAllowed), Reply::send(ClientEvent::Connected)]
    }

    fn on_event(&mut self, event: ServerEvent) -> Vec<Reply> {
        if self.phase == DuelPhase::Ineligible {
            return Vec::new();
        }
        match event {
            ServerEvent::AllowedCheck { allowed: false } => {
                self.phase = DuelPhase::Ineligible;
                self.controls_visible = false;
                self.ready_visible = false;
                Vec::new()
            }
            ServerEvent::Info { room, user_id } => {
                if let Some(room) = room {
                    self.room = room;
                }
                self.me.id = Some(user_id);
                // Announce presence once we know who we are.
                self.presence_probe().map(Reply::send).into_iter().collect()
            }
            ServerEvent::Wait => {
                // The round is abandoned; the pad stays usable but submit only clears it.
                self.phase = DuelPhase::AwaitingPeer;
                self.controls_visible = true;
                self.ready_visible = false;
                self.presence_probe()
                    .map(|event| Reply::SendLater { event, delay_ms: self.wait_probe_ms })
                    .into_iter()
                    .collect()
            }
            ServerEvent::OtherConnection { user_id, username } => {
                clog(&format!("peer {username} ({user_id}) joined"));
                self.peer.id = Some(user_id);
                self.peer.username = Some(username);
                if self.phase == DuelPhase::AwaitingPeer {
                    self.phase = DuelPhase::Drawing;
                }
                Vec::new()
            }
            ServerEvent::RecvChallenge(challenge) => {
                self.new_round(challenge);
                Vec::new()
            }
            ServerEvent::RecvImg { user_id, image } => {
                let Some(peer) = self.peer_for(user_id) else {
                    return Vec::new();
                };
                peer.submitted = true;
                self.peer_image = Some(image);
                // Decided now; only the result-colouring step reveals it later.
                self.peer_canvas_visible = self.me.submitted;
                Vec::new()
            }
            ServerEvent::ResultImg { result, user_id, points } => {
                let participant = if self.is_me(user_id) {
                    &mut self.me
                } else if let Some(peer) = self.peer_for(user_id) {
                    peer
                } else {
                    cwarn(&format!("result for unknown participant {user_id}"));
                    return Vec::new();
                };
                participant.result = Some(result);
                if result {
                    participant.score += points;
                }
                self.colour_results();
                Vec::new()
            }
            ServerEvent::OtherReady { user_id } => {
                // The server echoes our own ready back to the whole room.
                if let Some(peer) = self.peer_for(user_id) {
                    peer.ready = true;
                }
                Vec::new()
            }
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::strokes::testing::FakeSurface;

    const ME: UserId = UserId(1);
    const PEER: UserId = UserId(2);

    fn challenge(sound: &str) -> Challenge {
        Challenge { kana: "わ".into(), sound: sound.into(), sound_num: 44 }
    }

    fn in_round() -> DuelSession {
        let mut s = DuelSession::new(RoomId(5), 1000);
        s.on_event(ServerEvent::Info { room: Some(RoomId(5)), user_id: ME });
        s.on_event(ServerEvent::OtherConnection { user_id: PEER, username: "peer".into() });
        s.on_event(ServerEvent::RecvChallenge(challenge("wa")));
        s
    }

    fn draw_and_submit(s: &mut DuelSession, strokes: usize) -> Vec<Reply> {
        let surface = FakeSurface::default();
        for _ in 0..strokes {
            s.pointer_down(Point::new(0.0, 0.0));
            s.pointer_move(Point::new(4.0, 4.0), &surface);
            s.pointer_up(&surface);
        }
        s.submit()
    }

    fn peer_submits(s: &mut DuelSession) {
        s.on_event(ServerEvent::RecvImg { user_id: PEER, image: "data:peer".into() });
    }

    #[test]
    fn connect_checks_eligibility_and_announces_presence() {
        let mut s = DuelSession::new(RoomId(5), 1000);
        assert_eq!(
            s.on_open(),
            vec![Reply::send(ClientEvent::CheckAllowed), Reply::send(ClientEvent::Connected)]
        );
        assert_eq!(s.phase(), DuelPhase::AwaitingPeer);
        let replies = s.on_event(ServerEvent::Info { room: Some(RoomId(5)), user_id: ME });
        assert_eq!(replies, vec![Reply::send(ClientEvent::Waiting { room: RoomId(5), user_id: ME })]);
    }

    #[test]
    fn ineligible_is_terminal() {
        let mut s = DuelSession::new(RoomId(5), 1000);
        s.on_event(ServerEvent::AllowedCheck { allowed: false });
        assert!(s.blocked());
        s.on_event(ServerEvent::OtherConnection { user_id: PEER, username: "p".into() });
        s.on_event(ServerEvent::RecvChallenge(challenge("ka")));
        assert_eq!(s.phase(), DuelPhase::Ineligible);
        assert!(s.submit().is_empty());
    }

    #[test]
    fn wait_probes_again_after_delay() {
        let mut s = DuelSession::new(RoomId(5), 1200);
        s.on_event(ServerEvent::Info { room: None, user_id: ME });
        let replies = s.on_event(ServerEvent::Wait);
        assert_eq!(
            replies,
            vec![Reply::SendLater {
                event: ClientEvent::Waiting { room: RoomId(5), user_id: ME },
                delay_ms: 1200
            }]
        );
        assert!(s.waiting_overlay());
    }

    #[test]
    fn submit_while_alone_only_clears() {
        let mut s = DuelSession::new(RoomId(5), 1000);
        s.on_event(ServerEvent::Info { room: None, user_id: ME });
        let epoch = s.local_epoch();
        let replies = draw_and_submit(&mut s, 2);
        assert!(replies.is_empty());
        assert!(s.strokes().is_empty());
        assert_eq!(s.local_epoch(), epoch + 1);
        assert_eq!(s.phase(), DuelPhase::AwaitingPeer);
    }

    #[test]
    fn submission_packs_strokes_and_hides_controls() {
        let mut s = in_round();
        let replies = draw_and_submit(&mut s, 3);
        let Some(ClientEvent::ImageSubmit { user_id, image_data, room, sound_num }) = replies[0].event() else {
            panic!("expected image_submit, got {replies:?}");
        };
        assert_eq!((*user_id, *room, *sound_num), (ME, RoomId(5), 44));
        let strokes: serde_json::Map<String, serde_json::Value> = serde_json::from_str(image_data).unwrap();
        assert_eq!(strokes.len(), 3);
        assert!(!s.controls_visible());
        assert_eq!(s.phase(), DuelPhase::Submitted);
        assert!(s.me().submitted);
    }

    #[test]
    fn empty_drawing_is_not_submitted() {
        let mut s = in_round();
        assert!(s.submit().is_empty());
        assert_eq!(s.phase(), DuelPhase::Drawing);
    }

    #[test]
    fn peer_drawing_hidden_until_we_submit() {
        let mut s = in_round();
        peer_submits(&mut s);
        assert!(!s.peer_canvas_visible());
        assert_eq!(s.peer_image(), Some("data:peer"));
        // Submitting alone does not re-evaluate visibility.
        draw_and_submit(&mut s, 1);
        assert!(!s.peer_canvas_visible());
        s.on_event(ServerEvent::ResultImg { result: true, user_id: PEER, points: 4 });
        assert!(!s.peer_canvas_visible());
        s.on_event(ServerEvent::ResultImg { result: false, user_id: ME, points: 4 });
        assert!(s.peer_canvas_visible());
    }

    #[test]
    fn peer_drawing_shown_on_receipt_after_our_submit() {
        let mut s = in_round();
        draw_and_submit(&mut s, 1);
        peer_submits(&mut s);
        assert!(s.peer_canvas_visible());
    }

    #[test]
    fn colours_wait_for_both_submissions() {
        let mut s = in_round();
        draw_and_submit(&mut s, 2);
        s.on_event(ServerEvent::ResultImg { result: true, user_id: ME, points: 6 });
        assert_eq!(s.colours(), None);
        assert!(!s.ready_visible());
        assert_eq!(s.me().score, 6);

        peer_submits(&mut s);
        s.on_event(ServerEvent::ResultImg { result: false, user_id: PEER, points: 6 });
        assert_eq!(s.colours(), Some(ResultColours { me: CORRECT_COLOUR, peer: INCORRECT_COLOUR }));
        assert_eq!(s.peer().score, 0);
        assert!(s.ready_visible());
        assert_eq!(s.phase(), DuelPhase::Resolved);
    }

    #[test]
    fn colours_match_results_when_peer_finishes_first() {
        let mut s = in_round();
        peer_submits(&mut s);
        s.on_event(ServerEvent::ResultImg { result: true, user_id: PEER, points: 2 });
        assert_eq!(s.colours(), None);
        draw_and_submit(&mut s, 1);
        s.on_event(ServerEvent::ResultImg { result: false, user_id: ME, points: 2 });
        assert_eq!(s.colours(), Some(ResultColours { me: INCORRECT_COLOUR, peer: CORRECT_COLOUR }));
    }

    #[test]
    fn ready_flag_reflects_cached_peer_state() {
        let mut s = in_round();
        draw_and_submit(&mut s, 1);
        peer_submits(&mut s);
        s.on_event(ServerEvent::ResultImg { result: true, user_id: ME, points: 2 });
        s.on_event(ServerEvent::ResultImg { result: true, user_id: PEER, points: 2 });

        let replies = s.ready();
        assert_eq!(
            replies,
            vec![Reply::send(ClientEvent::UserReady { user_id: ME, other_id: PEER, both: false, room: RoomId(5) })]
        );
        assert_eq!(s.phase(), DuelPhase::AwaitingPeerReady);
        // Our own echo does not mark the peer ready.
        s.on_event(ServerEvent::OtherReady { user_id: ME });
        assert!(!s.peer().ready);
        s.on_event(ServerEvent::OtherReady { user_id: PEER });
        assert!(s.peer().ready);
        assert_eq!(s.phase(), DuelPhase::AwaitingPeerReady);
    }

    #[test]
    fn second_ready_reports_both() {
        let mut s = in_round();
        draw_and_submit(&mut s, 1);
        peer_submits(&mut s);
        s.on_event(ServerEvent::ResultImg { result: true, user_id: ME, points: 2 });
        s.on_event(ServerEvent::ResultImg { result: true, user_id: PEER, points: 2 });
        s.on_event(ServerEvent::OtherReady { user_id: PEER });
        let replies = s.ready();
        assert!(matches!(replies[0].event(), Some(ClientEvent::UserReady { both: true, .. })));
        assert_eq!(s.phase(), DuelPhase::Ready);
        assert!(s.ready().is_empty());
    }

    #[test]
    fn new_challenge_resets_round_but_keeps_identity_and_score() {
        let mut s = in_round();
        draw_and_submit(&mut s, 1);
        peer_submits(&mut s);
        s.on_event(ServerEvent::ResultImg { result: true, user_id: ME, points: 3 });
        s.on_event(ServerEvent::ResultImg { result: true, user_id: PEER, points: 3 });
        let (local, peer) = (s.local_epoch(), s.peer_epoch());

        s.on_event(ServerEvent::RecvChallenge(challenge("ka")));
        assert_eq!(s.phase(), DuelPhase::Drawing);
        assert!(s.prompt().contains("ka"));
        assert_eq!((s.local_epoch(), s.peer_epoch()), (local + 1, peer + 1));
        assert!(!s.me().submitted && !s.peer().submitted);
        assert_eq!((s.me().result, s.peer().result), (None, None));
        assert_eq!((s.me().id, s.peer().id), (Some(ME), Some(PEER)));
        assert_eq!((s.me().score, s.peer().score), (3, 3));
        assert!(s.controls_visible());
        assert!(!s.peer_canvas_visible());
        assert_eq!(s.colours(), None);
        assert_eq!(s.peer_image(), None);
    }

    #[test]
    fn drawing_after_submit_is_ignored() {
        let mut s = in_round();
        let surface = FakeSurface::default();
        draw_strokes_via_session(&mut s, &surface);
        s.submit();
        s.pointer_down(Point::new(1.0, 1.0));
        s.pointer_move(Point::new(2.0, 2.0), &surface);
        s.pointer_up(&surface);
        assert_eq!(s.strokes().len(), 1);
    }

    #[test]
    fn first_player_learns_peer_from_round_traffic() {
        let mut s = DuelSession::new(RoomId(5), 1000);
        s.on_event(ServerEvent::Info { room: Some(RoomId(5)), user_id: ME });
        s.on_event(ServerEvent::Wait);
        s.on_event(ServerEvent::RecvChallenge(challenge("wa")));
        assert_eq!(s.peer().id, None);

        draw_and_submit(&mut s, 1);
        s.on_event(ServerEvent::ResultImg { result: true, user_id: ME, points: 2 });
        peer_submits(&mut s);
        assert_eq!(s.peer().id, Some(PEER));
        s.on_event(ServerEvent::ResultImg { result: false, user_id: PEER, points: 2 });

        assert_eq!(s.phase(), DuelPhase::Resolved);
        assert_eq!(s.colours(), Some(ResultColours { me: CORRECT_COLOUR, peer: INCORRECT_COLOUR }));
        assert!(s.ready_visible());
        assert!(matches!(
            s.ready()[0].event(),
            Some(ClientEvent::UserReady { other_id: PEER, .. })
        ));
    }

    #[test]
    fn peer_result_can_arrive_before_its_image() {
        let mut s = DuelSession::new(RoomId(5), 1000);
        s.on_event(ServerEvent::Info { room: None, user_id: ME });
        s.on_event(ServerEvent::RecvChallenge(challenge("wa")));
        s.on_event(ServerEvent::ResultImg { result: true, user_id: PEER, points: 5 });
        assert_eq!(s.peer().id, Some(PEER));
        assert_eq!(s.peer().score, 5);
    }

    #[test]
    fn result_for_a_third_user_is_dropped() {
        let mut s = in_round();
        draw_and_submit(&mut s, 1);
        let replies = s.on_event(ServerEvent::ResultImg { result: true, user_id: UserId(9), points: 7 });
        assert!(replies.is_empty());
        assert_eq!((s.me().score, s.peer().score), (0, 0));
        assert_eq!((s.me().result, s.peer().result), (None, None));
        assert_eq!(s.peer().id, Some(PEER));
        s.on_event(ServerEvent::RecvImg { user_id: UserId(9), image: "data:stranger".into() });
        assert_eq!(s.peer_image(), None);
        assert!(!s.peer().submitted);
    }

    #[test]
    fn wait_mid_round_returns_to_waiting() {
        let probe = Reply::SendLater {
            event: ClientEvent::Waiting { room: RoomId(5), user_id: ME },
            delay_ms: 1000,
        };

        // While drawing.
        let mut s = in_round();
        let surface = FakeSurface::default();
        draw_strokes_via_session(&mut s, &surface);
        assert_eq!(s.on_event(ServerEvent::Wait), vec![probe.clone()]);
        assert!(s.waiting_overlay());
        let epoch = s.local_epoch();
        assert!(s.submit().is_empty());
        assert!(s.strokes().is_empty());
        assert_eq!(s.local_epoch(), epoch + 1);
        assert_eq!(s.phase(), DuelPhase::AwaitingPeer);

        // After submitting.
        let mut s = in_round();
        draw_and_submit(&mut s, 2);
        assert_eq!(s.phase(), DuelPhase::Submitted);
        assert_eq!(s.on_event(ServerEvent::Wait), vec![probe]);
        assert!(s.waiting_overlay());
        assert!(s.controls_visible());
        assert!(!s.ready_visible());
        draw_strokes_via_session(&mut s, &surface);
        assert!(s.submit().is_empty());
        assert!(s.strokes().is_empty());
        assert_eq!(s.phase(), DuelPhase::AwaitingPeer);
    }

    fn draw_strokes_via_session(s: &mut DuelSession, surface: &FakeSurface) {
        s.pointer_down(Point::new(0.0, 0.0));
        s.pointer_move(Point::new(1.0, 0.0), surface);
        s.pointer_up(surface);
    }
}
