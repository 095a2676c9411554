pub mod geom;
pub mod input;
pub mod notice;
pub mod surface;
pub mod timer;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use std::collections::HashSet;

    use crate::geom::Rect;
    use crate::input::{Action, InputSource};
    use crate::notice::NoticeSurface;
    use crate::surface::{DrawSurface, SpriteId};

    /// One recorded call against a [`RecordingSurface`].
    #[derive(Debug, Clone, PartialEq)]
    pub enum DrawCall {
        Clear,
        FillRect {
            rect: Rect,
            color: [u8; 4],
        },
        Sprite {
            sprite: SpriteId,
            src: Option<Rect>,
            dst: Rect,
            flip_x: bool,
        },
    }

    /// Draw surface that records every call for later assertions.
    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        pub calls: Vec<DrawCall>,
    }

    impl RecordingSurface {
        pub fn new() -> Self {
            Self::default()
        }

        /// Sprite draws recorded since construction or the last clear.
        pub fn sprites_since_clear(&self) -> Vec<&DrawCall> {
            let start = self
                .calls
                .iter()
                .rposition(|c| matches!(c, DrawCall::Clear))
                .map_or(0, |i| i + 1);
            self.calls[start..]
                .iter()
                .filter(|c| matches!(c, DrawCall::Sprite { .. }))
                .collect()
        }
    }

    impl DrawSurface for RecordingSurface {
        fn clear(&mut self) {
            self.calls.push(DrawCall::Clear);
        }

        fn fill_rect(&mut self, rect: Rect, color: [u8; 4]) {
            self.calls.push(DrawCall::FillRect { rect, color });
        }

        fn draw_sprite(&mut self, sprite: SpriteId, src: Option<Rect>, dst: Rect, flip_x: bool) {
            self.calls.push(DrawCall::Sprite {
                sprite,
                src,
                dst,
                flip_x,
            });
        }
    }

    /// Input source reporting a fixed set of held actions.
    #[derive(Debug, Default)]
    pub struct ScriptedInput {
        held: HashSet<Action>,
    }

    impl ScriptedInput {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn holding(actions: &[Action]) -> Self {
            Self {
                held: actions.iter().copied().collect(),
            }
        }

        pub fn press(&mut self, action: Action) {
            self.held.insert(action);
        }

        pub fn release(&mut self, action: Action) {
            self.held.remove(&action);
        }

        pub fn release_all(&mut self) {
            self.held.clear();
        }
    }

    impl InputSource for ScriptedInput {
        fn is_held(&self, action: Action) -> bool {
            self.held.contains(&action)
        }
    }

    /// Notice surface that captures the show/hide signal and message.
    #[derive(Debug, Default)]
    pub struct CapturingNotice {
        pub visible: bool,
        pub text: Option<String>,
    }

    impl CapturingNotice {
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl NoticeSurface for CapturingNotice {
        fn show(&mut self, text: &str) {
            self.visible = true;
            self.text = Some(text.to_string());
        }

        fn hide(&mut self) {
            self.visible = false;
        }
    }
}
