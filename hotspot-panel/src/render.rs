use hotspot_core::panel::Panel;

const LABEL_WIDTH: usize = 13;

fn row(out: &mut String, label: &str, value: &str) {
    out.push_str(&format!("{:<width$}{}\n", label, value, width = LABEL_WIDTH));
}

/// Plain-text rendering of the panel, one field per line.
pub fn render(panel: &Panel) -> String {
    let snapshot = panel.snapshot();
    let mut out = String::new();

    if panel.selection().is_none() {
        out.push_str("(no hotspot selected)\n");
    }
    row(&mut out, "Geolocation:", &snapshot.location);
    row(&mut out, "Date:", &snapshot.date);
    row(&mut out, "Status:", snapshot.status.label());
    row(&mut out, "RGB Photo:", panel.rgb_image().unwrap_or("-"));
    if panel.overlay_available() {
        row(&mut out, "", &format!("[{}]", panel.overlay_label()));
    }
    row(&mut out, "IR Photo:", panel.ir_image().unwrap_or("-"));
    if !panel.error_message().is_empty() {
        out.push_str(panel.error_message());
        out.push('\n');
    }
    out
}
