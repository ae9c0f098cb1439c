use crate::render::BubbleView;

/// The host page as seen by the widget.
///
/// Implementations hold shared handles (DOM nodes, test recorders), so every
/// operation takes `&self`.
pub trait ChatSurface {
    fn input_value(&self) -> String;
    fn clear_input(&self);
    /// Appends one bubble at the end of the chat log. The log is append-only.
    fn append_bubble(&self, bubble: &BubbleView);
    fn set_typing_visible(&self, visible: bool);
    fn scroll_to_bottom(&self);
    fn show_status(&self, text: &str);
    fn hide_status(&self);
    fn set_send_enabled(&self, enabled: bool);
}
