use crate::layout::DialGeometry;
use crate::level::Level;
use crate::scene::{DialScene, Painter};
use crate::state::DialState;
use crate::style::{DialColors, DialStyle, LabelTable};

/// Lifecycle callbacks a host invokes on size change and redraw.
pub trait Renderable {
    fn size_changed(&mut self, width: i32, height: i32);

    fn render<P: Painter>(&self, painter: &mut P) -> Result<(), P::Error>;
}

/// Receives the host's activation event (tap, click, key).
pub trait Tappable {
    fn on_activate(&mut self) -> Level;
}

#[derive(Debug, Clone)]
pub struct Dial {
    state: DialState,
    geometry: DialGeometry,
    colors: DialColors,
    style: DialStyle,
    labels: LabelTable,
    content_description: String,
}

impl Dial {
    pub fn new(colors: DialColors, style: DialStyle, labels: LabelTable) -> Self {
        Self::with_state(DialState::new(), colors, style, labels)
    }

    pub fn with_state(
        state: DialState,
        colors: DialColors,
        style: DialStyle,
        labels: LabelTable,
    ) -> Self {
        let mut dial = Self {
            state,
            geometry: DialGeometry::default(),
            colors,
            style,
            labels,
            content_description: String::new(),
        };
        dial.update_content_description();
        dial
    }

    pub fn level(&self) -> Level {
        self.state.level()
    }

    pub fn geometry(&self) -> &DialGeometry {
        &self.geometry
    }

    pub fn content_description(&self) -> &str {
        &self.content_description
    }

    pub fn set_colors(&mut self, colors: DialColors) {
        self.colors = colors;
    }

    pub fn set_labels(&mut self, labels: LabelTable) {
        self.labels = labels;
        self.update_content_description();
    }

    pub fn scene(&self) -> DialScene {
        DialScene::compose(
            self.state.level(),
            &self.geometry,
            &self.colors,
            &self.style,
            &self.labels,
        )
    }

    fn update_content_description(&mut self) {
        self.content_description = self.labels.label_for(self.state.level()).to_string();
    }
}

impl Renderable for Dial {
    fn size_changed(&mut self, width: i32, height: i32) {
        self.geometry = DialGeometry::from_size(width, height, self.style.radius_factor);
    }

    fn render<P: Painter>(&self, painter: &mut P) -> Result<(), P::Error> {
        self.scene().paint(painter)
    }
}

impl Tappable for Dial {
    fn on_activate(&mut self) -> Level {
        let level = self.state.activate();
        self.update_content_description();
        level
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Point;
    use crate::scene::tests::{RecordingPainter, Stroke};
    use crate::style::black;
    use palette::Srgba;

    fn dial() -> Dial {
        Dial::new(
            DialColors::new(
                Srgba::new(1.0, 0.92, 0.23, 1.0),
                Srgba::new(0.8, 0.86, 0.22, 1.0),
                Srgba::new(0.0, 0.59, 0.53, 1.0),
            ),
            DialStyle::default(),
            LabelTable::default(),
        )
    }

    #[test]
    fn test_description_follows_taps() {
        let mut dial = dial();
        assert_eq!(dial.level(), Level::Off);
        assert_eq!(dial.content_description(), "off");

        let seen: Vec<String> = (0..4)
            .map(|_| {
                dial.on_activate();
                dial.content_description().to_string()
            })
            .collect();
        assert_eq!(seen, vec!["1", "2", "3", "off"]);
        assert_eq!(dial.level(), Level::Off);
    }

    #[test]
    fn test_size_change_moves_the_dial() {
        let mut dial = dial();
        dial.size_changed(300, 500);
        assert_eq!(dial.geometry().center, Point::new(150.0, 250.0));
        assert!((dial.geometry().radius - 120.0).abs() < 1e-9);

        let mut painter = RecordingPainter::default();
        dial.render(&mut painter).unwrap();
        assert_eq!(
            painter.strokes[0],
            Stroke::Circle(Point::new(150.0, 250.0), dial.geometry().radius)
        );
    }

    #[test]
    fn test_relabel_refreshes_description() {
        let mut dial = dial();
        dial.on_activate();
        dial.set_labels(LabelTable::from_levels(["aus", "eins", "zwei", "drei"]));
        assert_eq!(dial.content_description(), "eins");
    }

    #[test]
    fn test_recolor_applies_to_next_scene() {
        let mut dial = Dial::with_state(
            DialState::starting_at(Level::High),
            DialColors::new(black(), black(), black()),
            DialStyle::default(),
            LabelTable::default(),
        );
        let teal = Srgba::new(0.0, 0.5, 0.5, 1.0);
        dial.set_colors(DialColors::new(black(), black(), teal));
        assert_eq!(dial.scene().face.color, teal);
        assert_eq!(dial.content_description(), "3");
    }
}
