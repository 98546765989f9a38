use std::collections::HashMap;

use eframe::egui::Color32;

/// Beat classes produced by the analysis service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BeatClass {
    /// Normal beat.
    N,
    /// Supraventricular ectopic beat.
    S,
    /// Ventricular ectopic beat.
    V,
    /// Fusion beat.
    F,
    /// Unclassifiable beat.
    Q,
}

impl BeatClass {
    pub const ALL: [BeatClass; 5] = [
        BeatClass::N,
        BeatClass::S,
        BeatClass::V,
        BeatClass::F,
        BeatClass::Q,
    ];

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim() {
            "N" => Some(BeatClass::N),
            "S" => Some(BeatClass::S),
            "V" => Some(BeatClass::V),
            "F" => Some(BeatClass::F),
            "Q" => Some(BeatClass::Q),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            BeatClass::N => "N",
            BeatClass::S => "S",
            BeatClass::V => "V",
            BeatClass::F => "F",
            BeatClass::Q => "Q",
        }
    }
}

pub const DEFAULT_CLASS_COLOR: Color32 = Color32::from_rgb(128, 128, 128);

/// Class tag to marker colour. Unknown or missing tags fall back to a neutral gray.
#[derive(Clone, Debug)]
pub struct ClassColorMap {
    colors: HashMap<BeatClass, Color32>,
    fallback: Color32,
}

impl Default for ClassColorMap {
    fn default() -> Self {
        let colors = HashMap::from([
            (BeatClass::N, Color32::from_rgb(0, 128, 0)),
            (BeatClass::S, Color32::from_rgb(0, 0, 255)),
            (BeatClass::V, Color32::from_rgb(255, 165, 0)),
            (BeatClass::F, Color32::from_rgb(128, 0, 128)),
            (BeatClass::Q, Color32::from_rgb(255, 192, 203)),
        ]);
        Self {
            colors,
            fallback: DEFAULT_CLASS_COLOR,
        }
    }
}

impl ClassColorMap {
    pub fn color_for(&self, tag: &str) -> Color32 {
        BeatClass::from_tag(tag)
            .and_then(|class| self.colors.get(&class).copied())
            .unwrap_or(self.fallback)
    }

    /// Colour of the `index`-th label, or the fallback when the stream is shorter than
    /// the peak set.
    pub fn color_at(&self, labels: &[String], index: usize) -> Color32 {
        labels
            .get(index)
            .map(|tag| self.color_for(tag))
            .unwrap_or(self.fallback)
    }

    pub fn legend(&self) -> Vec<(BeatClass, Color32)> {
        BeatClass::ALL
            .iter()
            .map(|class| (*class, self.color_for(class.tag())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tags_use_their_class_colour() {
        let palette = ClassColorMap::default();
        assert_eq!(palette.color_for("N"), Color32::from_rgb(0, 128, 0));
        assert_eq!(palette.color_for("V"), Color32::from_rgb(255, 165, 0));
        assert_eq!(palette.color_for(" Q "), Color32::from_rgb(255, 192, 203));
    }

    #[test]
    fn unknown_tag_maps_to_gray() {
        let palette = ClassColorMap::default();
        assert_eq!(palette.color_for("X"), DEFAULT_CLASS_COLOR);
        assert_eq!(palette.color_for(""), DEFAULT_CLASS_COLOR);
    }

    #[test]
    fn out_of_range_label_lookup_uses_fallback() {
        let palette = ClassColorMap::default();
        let labels = vec!["S".to_string()];
        assert_eq!(palette.color_at(&labels, 0), Color32::from_rgb(0, 0, 255));
        assert_eq!(palette.color_at(&labels, 5), DEFAULT_CLASS_COLOR);
    }
}
