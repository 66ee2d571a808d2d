//! Non-interactive output: every visible event, titled and rendered, in
//! list order.

use eslv_core::{render, view::detail_title, Event, EventView, Markup, Tone};

/// Write the events visible in `view` to `out`.
///
/// Each event is preceded by its `NAME #seq [time]` title and followed by a
/// blank line. Returns how many events were written. Fails if the sink
/// refuses a write or `view` was refreshed against a different slice.
pub fn write_events<M: Markup + ?Sized>(
    events: &[Event],
    view: &EventView,
    time_format: &str,
    out: &mut M,
) -> anyhow::Result<usize> {
    for row in 0..view.visible().len() {
        let event = view.selected(events, row)?;
        out.segment(Tone::Emphasis, &detail_title(event, time_format))?;
        out.newline()?;
        render(event, view.matcher(), out)?;
        out.newline()?;
        out.newline()?;
    }
    out.finish()?;

    tracing::info!(written = view.visible().len(), "headless output done");
    Ok(view.visible().len())
}
