use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::surface::{DrawSurface, Point};

/// Canvas rasters captured at the end of each stroke, keyed by stroke number (1-based).
///
/// A stroke is one pointer-down → pointer-up gesture. The recorder only tracks the
/// gesture; ink is laid down on the surface it is handed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StrokeRecorder {
    count: u32,
    active: bool,
    last: Point,
    snapshots: BTreeMap<u32, String>,
}

impl StrokeRecorder {
    pub fn begin(&mut self, at: Point) {
        // A second press without a release continues the open stroke.
        if !self.active {
            self.count += 1;
            self.active = true;
        }
        self.last = at;
    }

    pub fn extend(&mut self, to: Point, surface: &dyn DrawSurface) {
        if !self.active {
            return;
        }
        surface.line(self.last, to);
        self.last = to;
    }

    pub fn finish(&mut self, surface: &dyn DrawSurface) {
        if !self.active {
            return;
        }
        self.active = false;
        match surface.snapshot() {
            Some(raster) => {
                self.snapshots.insert(self.count, raster);
            }
            None => {
                // Nothing captured; give the number back so keys stay contiguous.
                self.count -= 1;
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_drawing(&self) -> bool {
        self.active
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// `{"Stroke1": raster, "Stroke2": raster, ...}` in stroke order.
    pub fn to_payload(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&StrokePayload(&self.snapshots))
    }
}

struct StrokePayload<'a>(&'a BTreeMap<u32, String>);

impl Serialize for StrokePayload<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (n, raster) in self.0 {
            map.serialize_entry(&format!("Stroke{n}"), raster)?;
        }
        map.end()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::{Cell, RefCell};

    use super::*;

    /// Surface that records segments and hands out numbered rasters.
    #[derive(Default)]
    pub struct FakeSurface {
        pub lines: RefCell<Vec<(Point, Point)>>,
        pub clears: Cell<u32>,
        pub snapshots: Cell<u32>,
        pub broken: Cell<bool>,
    }

    impl DrawSurface for FakeSurface {
        fn line(&self, from: Point, to: Point) {
            self.lines.borrow_mut().push((from, to));
        }

        fn clear(&self) {
            self.clears.set(self.clears.get() + 1);
        }

        fn snapshot(&self) -> Option<String> {
            if self.broken.get() {
                return None;
            }
            self.snapshots.set(self.snapshots.get() + 1);
            Some(format!("data:image/png;base64,{}", self.snapshots.get()))
        }
    }

    pub fn draw_strokes(recorder: &mut StrokeRecorder, surface: &FakeSurface, n: usize) {
        for i in 0..n {
            let y = i as f64 * 10.0;
            recorder.begin(Point::new(0.0, y));
            recorder.extend(Point::new(5.0, y), surface);
            recorder.extend(Point::new(10.0, y), surface);
            recorder.finish(surface);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{draw_strokes, FakeSurface};
    use super::*;

    #[test]
    fn one_snapshot_per_completed_gesture() {
        let surface = FakeSurface::default();
        let mut rec = StrokeRecorder::default();
        draw_strokes(&mut rec, &surface, 4);
        assert_eq!(rec.len(), 4);
        assert_eq!(surface.lines.borrow().len(), 8);

        // An unfinished gesture does not count.
        rec.begin(Point::new(1.0, 1.0));
        assert_eq!(rec.len(), 4);
        assert!(rec.is_drawing());
    }

    #[test]
    fn second_press_before_release_is_one_gesture() {
        let surface = FakeSurface::default();
        let mut rec = StrokeRecorder::default();
        rec.begin(Point::new(0.0, 0.0));
        rec.extend(Point::new(4.0, 0.0), &surface);
        rec.begin(Point::new(8.0, 8.0));
        rec.extend(Point::new(9.0, 9.0), &surface);
        rec.finish(&surface);
        assert_eq!(rec.len(), 1);
        assert!(!rec.is_drawing());
        assert_eq!(surface.snapshots.get(), 1);
        // The pen jumps to the second press point rather than drawing across.
        assert_eq!(surface.lines.borrow()[1], (Point::new(8.0, 8.0), Point::new(9.0, 9.0)));
        let parsed: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(&rec.to_payload().unwrap()).unwrap();
        assert_eq!(parsed.keys().map(String::as_str).collect::<Vec<_>>(), vec!["Stroke1"]);
    }

    #[test]
    fn moves_without_press_draw_nothing() {
        let surface = FakeSurface::default();
        let mut rec = StrokeRecorder::default();
        rec.extend(Point::new(3.0, 3.0), &surface);
        rec.finish(&surface);
        assert!(surface.lines.borrow().is_empty());
        assert!(rec.is_empty());
    }

    #[test]
    fn segments_chain_from_previous_point() {
        let surface = FakeSurface::default();
        let mut rec = StrokeRecorder::default();
        rec.begin(Point::new(1.0, 1.0));
        rec.extend(Point::new(2.0, 2.0), &surface);
        rec.extend(Point::new(3.0, 5.0), &surface);
        let lines = surface.lines.borrow();
        assert_eq!(lines[0], (Point::new(1.0, 1.0), Point::new(2.0, 2.0)));
        assert_eq!(lines[1], (Point::new(2.0, 2.0), Point::new(3.0, 5.0)));
    }

    #[test]
    fn payload_keys_follow_stroke_order_past_nine() {
        let surface = FakeSurface::default();
        let mut rec = StrokeRecorder::default();
        draw_strokes(&mut rec, &surface, 11);
        let payload = rec.to_payload().unwrap();
        let pos2 = payload.find("\"Stroke2\"").unwrap();
        let pos10 = payload.find("\"Stroke10\"").unwrap();
        assert!(pos2 < pos10, "Stroke10 must follow Stroke2 in {payload}");
        let last = payload.rfind("\"Stroke").unwrap();
        assert!(payload[last..].starts_with("\"Stroke11\""));
    }

    #[test]
    fn failed_capture_keeps_keys_contiguous() {
        let surface = FakeSurface::default();
        let mut rec = StrokeRecorder::default();
        draw_strokes(&mut rec, &surface, 1);
        surface.broken.set(true);
        draw_strokes(&mut rec, &surface, 1);
        surface.broken.set(false);
        draw_strokes(&mut rec, &surface, 1);
        let parsed: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(&rec.to_payload().unwrap()).unwrap();
        let keys: Vec<&str> = parsed.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Stroke1", "Stroke2"]);
    }

    #[test]
    fn reset_clears_everything() {
        let surface = FakeSurface::default();
        let mut rec = StrokeRecorder::default();
        draw_strokes(&mut rec, &surface, 2);
        rec.reset();
        assert!(rec.is_empty());
        assert_eq!(rec.to_payload().unwrap(), "{}");
        draw_strokes(&mut rec, &surface, 1);
        assert!(rec.to_payload().unwrap().contains("Stroke1"));
    }
}
