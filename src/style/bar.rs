//! Bar factories.

use super::{BarFactory, BarFlag, BarRenderer};
use crate::cells::{fit, pad, to_cells, to_string, truncate, width_of, Align, Cell};

/// Visual definition of a bar.
///
/// The fill is drawn with the last `gradient` character; earlier gradient
/// characters render the partially filled column. A `tip` is drawn after
/// the fill while the bar is neither empty nor full.
#[derive(Debug, Clone)]
pub struct BarSpec {
    gradient: Vec<Cell>,
    tip: Option<Cell>,
    background: Cell,
    borders: (String, String),
    overflow: String,
    underflow: String,
}

impl BarSpec {
    /// A bar filled with `fill` over `background`, closed with `|` borders.
    pub fn new(fill: char, background: char) -> Self {
        Self {
            gradient: vec![Cell::from_char(fill)],
            tip: None,
            background: Cell::from_char(background),
            borders: ("|".to_owned(), "|".to_owned()),
            overflow: "⚠".to_owned(),
            underflow: "✗".to_owned(),
        }
    }

    /// Partial-column characters, ending with the full character.
    #[must_use]
    pub fn gradient(mut self, chars: &str) -> Self {
        let cells = to_cells(chars);
        if !cells.is_empty() {
            self.gradient = cells;
        }
        self
    }

    /// A leading-edge character.
    #[must_use]
    pub fn tip(mut self, tip: char) -> Self {
        self.tip = Some(Cell::from_char(tip));
        self
    }

    /// Opening and closing borders.
    #[must_use]
    pub fn borders(mut self, left: &str, right: &str) -> Self {
        self.borders = (left.to_owned(), right.to_owned());
        self
    }

    /// Markers that replace the closing border on overflow and underflow.
    #[must_use]
    pub fn errors(mut self, overflow: &str, underflow: &str) -> Self {
        self.overflow = overflow.to_owned();
        self.underflow = underflow.to_owned();
        self
    }

    fn full(&self) -> &Cell {
        self.gradient.last().unwrap_or(&self.background)
    }
}

impl BarFactory for BarSpec {
    fn build(&self, length: usize) -> Box<dyn BarRenderer> {
        Box::new(FixedBar {
            spec: self.clone(),
            length,
        })
    }
}

/// A [`BarSpec`] bound to a length.
#[derive(Debug, Clone)]
pub struct FixedBar {
    spec: BarSpec,
    length: usize,
}

impl FixedBar {
    fn fill(&self, percent: f64) -> Vec<Cell> {
        let spec = &self.spec;
        let full = spec.full();
        let units = percent * self.length as f64;
        let full_columns = (units.floor() as usize).min(self.length);

        let mut cells = vec![full.clone(); full_columns / full.width()];
        if full_columns < self.length {
            let steps = spec.gradient.len();
            if steps > 1 {
                let partial = ((units - full_columns as f64) * steps as f64) as usize;
                if partial > 0 {
                    cells.push(spec.gradient[partial - 1].clone());
                }
            } else if let Some(tip) = spec.tip.as_ref().filter(|_| percent > 0.0) {
                cells.push(tip.clone());
            }
        }
        pad(&truncate(&cells, self.length), self.length, &spec.background, Align::Start)
    }
}

impl BarRenderer for FixedBar {
    fn render(&self, percent: f64, flag: Option<BarFlag>) -> String {
        let percent = if percent.is_nan() { 0.0 } else { percent.clamp(0.0, 1.0) };
        let (left, right) = &self.spec.borders;
        let closing = match flag {
            None => right,
            Some(BarFlag::Overflow) => &self.spec.overflow,
            Some(BarFlag::Underflow) => &self.spec.underflow,
        };
        let closing = fit(&to_cells(closing), width_of(&to_cells(right)), &Cell::SPACE);

        let mut out = String::with_capacity(self.length * 3 + 8);
        out.push_str(left);
        out.push_str(&to_string(&self.fill(percent)));
        out.push_str(&to_string(&closing));
        out
    }

    fn width(&self) -> usize {
        let (left, right) = &self.spec.borders;
        width_of(&to_cells(left)) + self.length + width_of(&to_cells(right))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classic(length: usize) -> Box<dyn BarRenderer> {
        BarSpec::new('=', ' ').tip('>').borders("[", "]").build(length)
    }

    fn smooth(length: usize) -> Box<dyn BarRenderer> {
        BarSpec::new('█', ' ').gradient("▏▎▍▌▋▊▉█").build(length)
    }

    fn filled(rendered: &str) -> usize {
        to_cells(rendered)
            .iter()
            .filter(|c| c.grapheme() != " " && !"[]|".contains(c.grapheme()))
            .count()
    }

    #[test]
    fn test_empty_bar() {
        assert_eq!(classic(5).render(0.0, None), "[     ]");
        assert_eq!(BarSpec::new('#', '.').build(4).render(0.0, None), "|....|");
    }

    #[test]
    fn test_full_bar() {
        assert_eq!(classic(5).render(1.0, None), "[=====]");
        assert_eq!(smooth(4).render(1.0, None), "|████|");
    }

    #[test]
    fn test_tip_and_partials() {
        assert_eq!(classic(10).render(0.5, None), "[=====>    ]");
        assert_eq!(smooth(4).render(0.5, None), "|██  |");
        assert_eq!(smooth(4).render(0.5625, None), "|██▎ |");
        assert_eq!(smooth(4).render(0.625, None), "|██▌ |");
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(classic(3).render(7.0, None), "[===]");
        assert_eq!(classic(3).render(-1.0, None), "[   ]");
        assert_eq!(classic(3).render(f64::NAN, None), "[   ]");
    }

    #[test]
    fn test_fill_is_monotonic() {
        for bar in [classic(17), smooth(17)] {
            let mut last = 0;
            for step in 0..=200 {
                let rendered = bar.render(f64::from(step) / 200.0, None);
                let count = filled(&rendered);
                assert!(count >= last, "{rendered}");
                assert_eq!(width_of(&to_cells(&rendered)), bar.width());
                last = count;
            }
        }
    }

    #[test]
    fn test_error_markers_replace_closing_border() {
        let bar = smooth(4);
        assert!(bar.render(1.0, Some(BarFlag::Overflow)).ends_with('⚠'));
        assert!(bar.render(0.5, Some(BarFlag::Underflow)).ends_with('✗'));
        assert!(bar.render(0.5, Some(BarFlag::Underflow)).starts_with('|'));
    }

    #[test]
    fn test_wide_marker_keeps_width() {
        let bar = BarSpec::new('=', ' ').errors("🚨", "x").build(3);
        assert_eq!(width_of(&to_cells(&bar.render(1.0, Some(BarFlag::Overflow)))), bar.width());
    }
}
