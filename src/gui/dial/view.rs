use cairo::{Context, Format, ImageSurface};
use fandial_core::{Color, Dial, Painter, Point, Renderable, TextStyle};
use std::f64::consts::PI;
use std::path::Path;

pub struct CairoPainter<'a> {
    cr: &'a Context,
}

impl<'a> CairoPainter<'a> {
    pub fn new(cr: &'a Context) -> Self {
        Self { cr }
    }

    fn set_color(&self, color: Color) {
        let (r, g, b, a) = color.into_components();
        self.cr.set_source_rgba(r, g, b, a);
    }
}

impl Painter for CairoPainter<'_> {
    type Error = cairo::Error;

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color) -> Result<(), Self::Error> {
        self.set_color(color);
        self.cr.new_path();
        self.cr.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
        self.cr.fill()
    }

    fn fill_text(
        &mut self,
        text: &str,
        anchor: Point,
        style: &TextStyle,
        color: Color,
    ) -> Result<(), Self::Error> {
        let weight = if style.bold {
            cairo::FontWeight::Bold
        } else {
            cairo::FontWeight::Normal
        };
        self.set_color(color);
        self.cr.select_font_face(&style.family, cairo::FontSlant::Normal, weight);
        self.cr.set_font_size(style.size);

        let ext = self.cr.text_extents(text)?;
        // baseline stays on the anchor, only x is centered
        self.cr.move_to(anchor.x - ext.x_advance() / 2.0, anchor.y);
        self.cr.show_text(text)
    }
}

pub fn draw(cr: &Context, dial: &Dial) -> Result<(), cairo::Error> {
    dial.render(&mut CairoPainter::new(cr))
}

/// Renders `dial` at its current geometry onto a white PNG.
pub fn write_png(dial: &Dial, path: &Path) -> anyhow::Result<()> {
    let (width, height) = dial.geometry().size();
    let surface = ImageSurface::create(Format::ARgb32, width, height)?;
    {
        let cr = Context::new(&surface)?;
        cr.set_source_rgb(1.0, 1.0, 1.0);
        cr.paint()?;
        draw(&cr, dial)?;
    }
    surface.flush();

    let mut file = fs_err::File::create(path)?;
    surface.write_to_png(&mut file)?;
    Ok(())
}
