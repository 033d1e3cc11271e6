use slotmap::new_key_type;

new_key_type! {
    /// Opaque identifier for a widget stored in the tree arena.
    ///
    /// Ids are stable for the lifetime of the widget and are never reused
    /// while the widget is alive; a stale id fails validation rather than
    /// aliasing a new widget.
    pub struct WidgetId;
}
