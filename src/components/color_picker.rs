use once_cell::sync::Lazy;

/// Preset swatches offered by the picker, matching the app's palette.
pub static PRESETS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "#34d399", "#10b981", "#a3e635", "#eab308", "#f97316", "#ef4444", "#ec4899", "#8b5cf6",
        "#3b82f6", "#22d3ee",
    ]
});

/// Modal state producing a `#RRGGBB` string for a plant. The original
/// canvas drag surface is out of scope; this keeps the modal lifecycle:
/// open with the current color, pick a preset or type a hex value, then
/// confirm or cancel.
#[derive(Debug, Clone, Default)]
pub struct ColorPicker {
    open: bool,
    draft: String,
}

impl ColorPicker {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self, current: &str) {
        self.open = true;
        self.draft = current.to_string();
    }

    pub fn cancel(&mut self) {
        self.open = false;
        self.draft.clear();
    }

    /// Replace the draft with a preset swatch. Out-of-range indices leave
    /// the draft alone.
    pub fn pick_preset(&mut self, index: usize) {
        if !self.open {
            return;
        }
        if let Some(color) = PRESETS.get(index) {
            self.draft = (*color).to_string();
        }
    }

    pub fn input(&mut self, text: &str) {
        if self.open {
            self.draft = text.to_string();
        }
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Close the modal and yield the normalized color. An unparseable
    /// draft keeps the modal open and yields nothing.
    pub fn confirm(&mut self) -> Option<String> {
        let color = normalize_hex(&self.draft)?;
        self.open = false;
        self.draft.clear();
        Some(color)
    }
}

/// Normalize a hex color to lowercase `#rrggbb`. Accepts `rgb` shorthand
/// and an optional leading `#`.
pub fn normalize_hex(input: &str) -> Option<String> {
    let digits = input.trim().trim_start_matches('#');
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match digits.len() {
        6 => Some(format!("#{}", digits.to_ascii_lowercase())),
        3 => {
            let mut out = String::with_capacity(7);
            out.push('#');
            for c in digits.chars() {
                let c = c.to_ascii_lowercase();
                out.push(c);
                out.push(c);
            }
            Some(out)
        }
        _ => None,
    }
}

pub fn render(picker: &ColorPicker) -> String {
    if !picker.is_open() {
        return String::new();
    }
    let mut out = String::from("  pick a color:\n");
    for (i, color) in PRESETS.iter().enumerate() {
        out.push_str(&format!("   {:>2}. {}\n", i + 1, color));
    }
    out.push_str(&format!(
        "  draft: {}  (`ok` to apply, `cancel` to close)\n",
        picker.draft()
    ));
    out
}
