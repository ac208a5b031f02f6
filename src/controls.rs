use log::info;
use winit::keyboard::KeyCode;

use crate::optics::CausticEngine;

/// Plane depth change per key press.
pub const DEFAULT_STEP: f64 = 0.1;

/// What the user asked for, independent of the key that was pressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    IncreaseDistance,
    DecreaseDistance,
    ReportDistance,
    Quit,
}

/// What the window has to do after an intent was applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Effect {
    Redraw,
    Reported,
    Exit,
}

pub fn intent_for_key(key: KeyCode) -> Option<Intent> {
    match key {
        KeyCode::KeyW | KeyCode::ArrowUp => Some(Intent::IncreaseDistance),
        KeyCode::KeyS | KeyCode::ArrowDown => Some(Intent::DecreaseDistance),
        KeyCode::KeyQ => Some(Intent::ReportDistance),
        KeyCode::Escape => Some(Intent::Quit),
        _ => None,
    }
}

/// Moves the receiver plane in response to intents.
pub struct Controller {
    engine: CausticEngine,
    step: f64,
}

impl Controller {
    pub fn new(engine: CausticEngine, step: f64) -> Self {
        Self { engine, step }
    }

    pub fn engine(&self) -> &CausticEngine {
        &self.engine
    }

    pub fn apply(&mut self, intent: Intent) -> Effect {
        match intent {
            Intent::IncreaseDistance => {
                let depth = self.engine.plane_depth() + self.step;
                self.engine.set_plane_depth(depth);
                Effect::Redraw
            }
            Intent::DecreaseDistance => {
                let depth = self.engine.plane_depth() - self.step;
                self.engine.set_plane_depth(depth);
                Effect::Redraw
            }
            Intent::ReportDistance => {
                let depth = self.engine.plane_depth();
                info!("Current lens-to-wall distance: {depth}");
                Effect::Reported
            }
            Intent::Quit => Effect::Exit,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::optics::engine::test::flat_lens;
    use crate::optics::{DisplayDomain, RefractionParams};
    use crate::test_helper::check_infos;
    use approx::assert_abs_diff_eq;

    fn controller(depth: f64) -> Controller {
        let engine = CausticEngine::new(
            flat_lens(),
            &RefractionParams::default(),
            DisplayDomain::default(),
            depth,
        );
        Controller::new(engine, DEFAULT_STEP)
    }

    #[test]
    fn key_mapping() {
        assert_eq!(intent_for_key(KeyCode::KeyW), Some(Intent::IncreaseDistance));
        assert_eq!(intent_for_key(KeyCode::ArrowUp), Some(Intent::IncreaseDistance));
        assert_eq!(intent_for_key(KeyCode::KeyS), Some(Intent::DecreaseDistance));
        assert_eq!(intent_for_key(KeyCode::ArrowDown), Some(Intent::DecreaseDistance));
        assert_eq!(intent_for_key(KeyCode::KeyQ), Some(Intent::ReportDistance));
        assert_eq!(intent_for_key(KeyCode::Escape), Some(Intent::Quit));
        assert_eq!(intent_for_key(KeyCode::KeyH), None);
        assert_eq!(intent_for_key(KeyCode::KeyA), None);
    }
    #[test]
    fn increase_and_decrease() {
        let mut controller = controller(1.0);
        assert_eq!(controller.apply(Intent::IncreaseDistance), Effect::Redraw);
        assert_abs_diff_eq!(controller.engine().plane_depth(), 1.1, epsilon = 1e-12);
        assert_eq!(controller.apply(Intent::DecreaseDistance), Effect::Redraw);
        assert_eq!(controller.apply(Intent::DecreaseDistance), Effect::Redraw);
        assert_abs_diff_eq!(controller.engine().plane_depth(), 0.9, epsilon = 1e-12);
    }
    #[test]
    fn depth_change_recomputes_points() {
        let mut controller = controller(1.0);
        let before = controller.engine().intersections().to_vec();
        controller.apply(Intent::IncreaseDistance);
        assert_ne!(controller.engine().intersections(), before.as_slice());
    }
    #[test]
    fn report_does_not_recompute() {
        testing_logger::setup();
        let mut controller = controller(2.5);
        let before = controller.engine().intersections().to_vec();
        assert_eq!(controller.apply(Intent::ReportDistance), Effect::Reported);
        assert_eq!(controller.engine().intersections(), before.as_slice());
        assert_eq!(controller.engine().plane_depth(), 2.5);
        check_infos(vec!["Current lens-to-wall distance: 2.5"]);
    }
    #[test]
    fn quit() {
        let mut controller = controller(1.0);
        assert_eq!(controller.apply(Intent::Quit), Effect::Exit);
        assert_eq!(controller.engine().plane_depth(), 1.0);
    }
    #[test]
    fn custom_step() {
        let engine = CausticEngine::new(
            flat_lens(),
            &RefractionParams::default(),
            DisplayDomain::default(),
            0.0,
        );
        let mut controller = Controller::new(engine, 0.5);
        controller.apply(Intent::DecreaseDistance);
        controller.apply(Intent::DecreaseDistance);
        assert_eq!(controller.engine().plane_depth(), -1.0);
    }
}
