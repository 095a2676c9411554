/// External UI surface for the single session banner (level complete).
/// The core owns only the show/hide signal and the message text.
pub trait NoticeSurface {
    fn show(&mut self, text: &str);
    fn hide(&mut self);
}
