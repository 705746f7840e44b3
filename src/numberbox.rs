//!
//! Number box widget.
//!
//! Shows a single value, formatted to a bounded width.
//! The state is built from an atom line of a patch and
//! attached to a [Gui].
//!
//! ```
//! use rat_numberbox::gui::Gui;
//! use rat_numberbox::numberbox::{Numberbox, NumberboxState};
//! use ratatui::buffer::Buffer;
//! use ratatui::layout::Rect;
//! use ratatui::widgets::StatefulWidget;
//!
//! let mut gui = Gui::new();
//! gui.set_parent_area(Rect::new(0, 0, 80, 24));
//!
//! let mut state = NumberboxState::from_atom_line(&["numberbox", "0", "0", "5"], &mut gui)
//!     .expect("numberbox");
//! state.set_value(12.5);
//! assert_eq!(state.number_label().text(), "12.5");
//!
//! let area = state.preferred_area();
//! let mut buf = Buffer::empty(Rect::new(0, 0, 80, 24));
//! Numberbox::new().render(area, &mut buf, &mut state);
//! ```
//!
//! Numbers that don't fit are first shown with fewer fraction digits,
//! and then cut off and marked with a trailing `>`.
//!

use crate::_private::NonExhaustive;
use crate::atom_line::AtomLine;
use crate::gui::{Gui, WidgetId, WidgetKind};
use crate::WidgetError;
use format_num_pattern::{Locale, NumberFmtError, NumberFormat, NumberSymbols};
use log::{debug, warn};
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect, Size};
use ratatui::prelude::BlockExt;
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::{Block, StatefulWidget, Widget};
#[cfg(feature = "unstable-widget-ref")]
use ratatui::widgets::StatefulWidgetRef;
use unicode_segmentation::UnicodeSegmentation;

/// Accepted type tokens.
const KINDS: [&str; 2] = ["numberbox", "floatatom"];

/// Marker for cut off values.
const OVERFLOW: &str = ">";

/// Integer places of the compact format. Larger values
/// fall back to exponent notation.
const COMPACT_INTEGER_DIGITS: usize = 15;

/// Upper limit for fraction digits.
const MAX_FRACTION_DIGITS: u8 = 15;

/// Placement of the descriptive label.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LabelPos {
    #[default]
    Left,
    Right,
    Top,
    Bottom,
}

impl LabelPos {
    /// From the patch file encoding. Unknown values give Left.
    pub fn from_index(idx: i64) -> Self {
        match idx {
            1 => LabelPos::Right,
            2 => LabelPos::Top,
            3 => LabelPos::Bottom,
            _ => LabelPos::Left,
        }
    }
}

/// Converts values to display text.
///
/// Without a pattern the formatter uses a compact form:
/// up to [max_fraction_digits](NumberLabelFormatter::max_fraction_digits)
/// fraction digits, without trailing zeros. With a pattern
/// the [format_num_pattern] output is used, without padding.
#[derive(Debug, Clone)]
pub struct NumberLabelFormatter {
    pattern: Option<String>,
    format: Option<NumberFormat>,
    locale: Locale,
    sym: NumberSymbols,
    max_fraction_digits: u8,
    // compact formats indexed by fraction digits
    compact: Vec<Option<NumberFormat>>,
}

impl Default for NumberLabelFormatter {
    fn default() -> Self {
        Self::with_locale(Locale::default())
    }
}

impl NumberLabelFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_locale(locale: Locale) -> Self {
        let sym = NumberSymbols::numeric(locale);
        let max_fraction_digits = 6;
        Self {
            pattern: None,
            format: None,
            locale,
            compact: compact_formats(&sym, max_fraction_digits),
            sym,
            max_fraction_digits,
        }
    }

    /// Current pattern, if any.
    #[inline]
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    #[inline]
    pub fn locale(&self) -> Locale {
        self.locale
    }

    #[inline]
    pub fn max_fraction_digits(&self) -> u8 {
        self.max_fraction_digits
    }

    /// Use a [format_num_pattern] pattern.
    ///
    /// The formatter is unchanged if the pattern is invalid.
    pub fn set_pattern<S: AsRef<str>>(&mut self, pattern: S) -> Result<(), NumberFmtError> {
        let format = NumberFormat::news(pattern.as_ref(), self.sym.clone())?;
        self.pattern = Some(pattern.as_ref().to_string());
        self.format = Some(format);
        Ok(())
    }

    /// Back to the compact form.
    pub fn clear_pattern(&mut self) {
        self.pattern = None;
        self.format = None;
    }

    /// Change the locale. A pattern is rebuilt with the new symbols.
    pub fn set_locale(&mut self, locale: Locale) -> Result<(), NumberFmtError> {
        let sym = NumberSymbols::numeric(locale);
        let format = match &self.pattern {
            Some(pattern) => Some(NumberFormat::news(pattern, sym.clone())?),
            None => None,
        };
        self.compact = compact_formats(&sym, self.max_fraction_digits);
        self.locale = locale;
        self.sym = sym;
        self.format = format;
        Ok(())
    }

    /// Maximum fraction digits for the compact form.
    pub fn set_max_fraction_digits(&mut self, digits: u8) {
        self.max_fraction_digits = digits.min(MAX_FRACTION_DIGITS);
        self.compact = compact_formats(&self.sym, self.max_fraction_digits);
    }

    /// Format the value to fit the given width.
    ///
    /// A width of 0 doesn't restrict the output.
    pub fn format(&self, value: f64, width: u16) -> String {
        let width = width as usize;

        if value.is_nan() {
            return fit(String::from("nan"), width);
        } else if value.is_infinite() {
            let txt = if value > 0.0 { "inf" } else { "-inf" };
            return fit(txt.to_string(), width);
        }

        if let Some(format) = &self.format {
            let txt = match format.fmt(value) {
                Ok(v) => v.trim().to_string(),
                Err(_) => format!("{:e}", value),
            };
            return fit(txt, width);
        }

        let txt = self.compact(value, self.max_fraction_digits);
        if width == 0 || text_width(&txt) <= width {
            return txt;
        }
        // shed fraction digits first
        for digits in (0..self.max_fraction_digits).rev() {
            let txt = self.compact(value, digits);
            if text_width(&txt) <= width {
                return txt;
            }
        }
        fit(self.compact(value, 0), width)
    }

    fn compact(&self, value: f64, digits: u8) -> String {
        let txt = match self.compact.get(digits as usize) {
            Some(Some(format)) => match format.fmt(value) {
                Ok(v) => v.trim().to_string(),
                Err(_) => return format!("{:e}", value),
            },
            _ => return value.to_string(),
        };

        let decimal_sep = self.sym.decimal_sep.to_string();
        let txt = if digits > 0 {
            let txt = txt.trim_end_matches('0');
            txt.strip_suffix(decimal_sep.as_str()).unwrap_or(txt)
        } else {
            txt.as_str()
        };

        // rounding can leave a negative zero
        let negative_zero = format!("{}0", self.sym.negative_sym);
        if txt == negative_zero {
            "0".to_string()
        } else {
            txt.to_string()
        }
    }
}

/// Compact formats for 0..=max_digits fraction digits.
fn compact_formats(sym: &NumberSymbols, max_digits: u8) -> Vec<Option<NumberFormat>> {
    (0..=max_digits)
        .map(|digits| {
            let mut pattern = "#".repeat(COMPACT_INTEGER_DIGITS);
            pattern.push('0');
            if digits > 0 {
                pattern.push('.');
                pattern.push_str(&"0".repeat(digits as usize));
            }
            match NumberFormat::news(&pattern, sym.clone()) {
                Ok(v) => Some(v),
                Err(e) => {
                    warn!("compact number format {:?}: {:?}", pattern, e);
                    None
                }
            }
        })
        .collect()
}

/// Display width in cells, saturated to u16.
fn cell_width(txt: &str) -> u16 {
    text_width(txt).min(u16::MAX as usize) as u16
}

/// Display width in cells.
fn text_width(txt: &str) -> usize {
    unicode_display_width::width(txt) as usize
}

/// Cut the text to width and mark the overflow.
fn fit(txt: String, width: usize) -> String {
    if width == 0 || text_width(&txt) <= width {
        return txt;
    }

    let mut res = String::new();
    let mut w = 0;
    for g in txt.graphemes(true) {
        let gw = unicode_display_width::width(g) as usize;
        if w + gw + 1 > width {
            break;
        }
        res.push_str(g);
        w += gw;
    }
    res.push_str(OVERFLOW);
    res
}

/// Text display for the value.
///
/// The text can only be changed by the owning [NumberboxState].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NumberLabel {
    text: String,
}

impl NumberLabel {
    #[inline]
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Display width in cells.
    #[inline]
    pub fn width(&self) -> u16 {
        cell_width(&self.text)
    }

    fn set_text(&mut self, text: String) {
        self.text = text;
    }
}

/// Number box widget.
#[derive(Debug, Default, Clone)]
pub struct Numberbox<'a> {
    style: Style,
    label_style: Option<Style>,
    block: Option<Block<'a>>,
}

/// Combined style.
#[derive(Debug, Clone)]
pub struct NumberboxStyle {
    /// Base style.
    pub style: Style,
    /// Descriptive label.
    pub label: Option<Style>,
    /// Border
    pub block: Option<Block<'static>>,

    pub non_exhaustive: NonExhaustive,
}

impl Default for NumberboxStyle {
    fn default() -> Self {
        Self {
            style: Default::default(),
            label: Default::default(),
            block: Default::default(),
            non_exhaustive: NonExhaustive,
        }
    }
}

/// State.
///
/// Not Clone, the state is the single owner of its registry entry
/// in the [Gui].
#[derive(Debug)]
pub struct NumberboxState {
    /// Complete area, including the descriptive label.
    /// __read only__. renewed for each render.
    pub area: Rect,
    /// Area of the box, including the block.
    /// __read only__. renewed for each render.
    pub box_area: Rect,
    /// Area of the value text.
    /// __read only__. renewed for each render.
    pub inner: Rect,
    /// Area of the descriptive label.
    /// __read only__. renewed for each render.
    pub label_area: Rect,

    id: WidgetId,
    position: Position,
    num_width: u16,
    number_label: NumberLabel,
    number_label_formatter: NumberLabelFormatter,
    value: f64,
    range: Option<(f64, f64)>,
    label: Option<String>,
    label_pos: LabelPos,
    receive_name: Option<String>,
    send_name: Option<String>,

    pub non_exhaustive: NonExhaustive,
}

impl<'a> Numberbox<'a> {
    /// New widget.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set all styles.
    pub fn styles(mut self, styles: NumberboxStyle) -> Self {
        self.style = styles.style;
        if styles.label.is_some() {
            self.label_style = styles.label;
        }
        if let Some(block) = styles.block {
            self.block = Some(block);
        }
        self.block = self.block.map(|v| v.style(self.style));
        self
    }

    /// Base style.
    #[inline]
    pub fn style(mut self, style: impl Into<Style>) -> Self {
        self.style = style.into();
        self
    }

    /// Style for the descriptive label.
    #[inline]
    pub fn label_style(mut self, style: impl Into<Style>) -> Self {
        self.label_style = Some(style.into());
        self
    }

    /// Block.
    #[inline]
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self.block = self.block.map(|v| v.style(self.style));
        self
    }

    /// Width of the box including the block.
    pub fn box_width(&self, state: &NumberboxState) -> u16 {
        state
            .box_width()
            .saturating_add(block_size(&self.block).width)
    }

    /// Inherent width, including the descriptive label.
    pub fn width(&self, state: &NumberboxState) -> u16 {
        let box_width = self.box_width(state);
        let label_width = state.label_width();
        match state.label_pos {
            LabelPos::Left | LabelPos::Right if label_width > 0 => {
                box_width.saturating_add(1).saturating_add(label_width)
            }
            _ => box_width.max(label_width),
        }
    }

    /// Inherent height, including the descriptive label.
    pub fn height(&self, state: &NumberboxState) -> u16 {
        let box_height = block_size(&self.block).height.saturating_add(1);
        match state.label_pos {
            LabelPos::Top | LabelPos::Bottom if state.label_width() > 0 => {
                box_height.saturating_add(1)
            }
            _ => box_height,
        }
    }
}

fn block_size(block: &Option<Block<'_>>) -> Size {
    let area = Rect::new(0, 0, 20, 20);
    let inner = block.inner_if_some(area);
    Size {
        width: (inner.left() - area.left()) + (area.right() - inner.right()),
        height: (inner.top() - area.top()) + (area.bottom() - inner.bottom()),
    }
}

#[cfg(feature = "unstable-widget-ref")]
impl StatefulWidgetRef for Numberbox<'_> {
    type State = NumberboxState;

    fn render_ref(&self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        render_ref(self, area, buf, state);
    }
}

impl StatefulWidget for &Numberbox<'_> {
    type State = NumberboxState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        render_ref(self, area, buf, state);
    }
}

impl StatefulWidget for Numberbox<'_> {
    type State = NumberboxState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        render_ref(&self, area, buf, state);
    }
}

fn render_ref(widget: &Numberbox<'_>, area: Rect, buf: &mut Buffer, state: &mut NumberboxState) {
    state.area = area;

    let box_width = widget.box_width(state);
    let box_height = block_size(&widget.block).height.saturating_add(1);
    let label_width = state.label_width();

    let (box_area, label_area) = if label_width == 0 {
        (area, Rect::new(area.x, area.y, 0, 0))
    } else {
        match state.label_pos {
            LabelPos::Left => {
                let label_area = Rect::new(area.x, area.y, label_width, 1).intersection(area);
                let box_x = area.x.saturating_add(label_width).saturating_add(1);
                let box_area =
                    Rect::new(box_x, area.y, area.right().saturating_sub(box_x), area.height);
                (box_area, label_area)
            }
            LabelPos::Right => {
                let box_area =
                    Rect::new(area.x, area.y, box_width.min(area.width), area.height);
                let label_x = box_area.right().saturating_add(1);
                let label_area =
                    Rect::new(label_x, area.y, label_width, 1).intersection(area);
                (box_area, label_area)
            }
            LabelPos::Top if area.height > box_height => {
                let label_area = Rect::new(area.x, area.y, area.width, 1);
                let box_area = Rect::new(area.x, area.y + 1, area.width, area.height - 1);
                (box_area, label_area)
            }
            LabelPos::Bottom if area.height > box_height => {
                let box_area = Rect::new(area.x, area.y, area.width, box_height);
                let label_area = Rect::new(area.x, area.y + box_height, area.width, 1);
                (box_area, label_area)
            }
            // no room for the label
            LabelPos::Top | LabelPos::Bottom => (area, Rect::new(area.x, area.y, 0, 0)),
        }
    };

    state.box_area = Rect::new(
        box_area.x,
        box_area.y,
        box_width.min(box_area.width),
        box_height.min(box_area.height),
    );
    state.inner = widget.block.inner_if_some(state.box_area);
    state.label_area = label_area;

    if let Some(block) = &widget.block {
        block.render(state.box_area, buf);
    } else {
        buf.set_style(state.box_area, widget.style);
    }

    Span::from(state.number_label.text()).render(state.inner, buf);

    if let Some(label) = &state.label {
        let label_style = widget.label_style.unwrap_or(widget.style);
        Span::from(label.as_str())
            .style(label_style)
            .render(state.label_area, buf);
    }
}

impl NumberboxState {
    /// Create a number box from the tokens of a patch line and
    /// attach it to the gui.
    ///
    /// Token layout after an optional `#X` prefix:
    ///
    /// `type x y width [min max [label-pos [label [receive [send]]]]]`
    ///
    /// `type` is `numberbox` or `floatatom`. Construction is all or
    /// nothing: on error nothing is attached to the gui.
    pub fn from_atom_line<S: AsRef<str>>(line: &[S], gui: &mut Gui) -> Result<Self, WidgetError> {
        match Self::build(AtomLine::new(line), gui) {
            Ok(state) => {
                debug!(
                    "numberbox {:?} at {:?} width {}",
                    state.id, state.position, state.num_width
                );
                Ok(state)
            }
            Err(e) => {
                warn!("numberbox not created: {}", e);
                Err(e)
            }
        }
    }

    fn build<S: AsRef<str>>(line: AtomLine<'_, S>, gui: &mut Gui) -> Result<Self, WidgetError> {
        if !gui.is_valid() {
            return Err(WidgetError::InvalidGui);
        }

        let kind = line.required(0, "type")?;
        if !KINDS.contains(&kind) {
            return Err(WidgetError::UnknownKind(kind.to_string()));
        }

        let x = line.int(1, "x")?;
        let y = line.int(2, "y")?;
        let width = line.int(3, "width")?;
        if width < 0 {
            return Err(WidgetError::NegativeWidth(width));
        }
        let num_width = u16::try_from(width).map_err(|_| WidgetError::InvalidNumber {
            index: 3,
            name: "width",
            token: width.to_string(),
        })?;

        let min = line.float_or(4, "min", 0.0)?;
        let max = line.float_or(5, "max", 0.0)?;
        let range = if min == 0.0 && max == 0.0 {
            None
        } else if min <= max {
            Some((min, max))
        } else {
            Some((max, min))
        };

        let label_pos = if line.len() > 6 {
            LabelPos::from_index(line.int(6, "label position")?)
        } else {
            LabelPos::Left
        };
        let label = line.symbol(7).map(|v| v.to_string());
        let receive_name = line.symbol(8).map(|v| v.to_string());
        let send_name = line.symbol(9).map(|v| v.to_string());

        let mut number_label_formatter = NumberLabelFormatter::with_locale(gui.locale());
        number_label_formatter.set_max_fraction_digits(gui.config().max_fraction_digits);

        let mut state = Self {
            area: Default::default(),
            box_area: Default::default(),
            inner: Default::default(),
            label_area: Default::default(),
            id: WidgetId::default(),
            position: gui.patch_to_cell(x, y),
            num_width,
            number_label: NumberLabel::default(),
            number_label_formatter,
            value: 0.0,
            range,
            label,
            label_pos,
            receive_name,
            send_name,
            non_exhaustive: NonExhaustive,
        };
        state.value = state.clamp(0.0);
        state.reformat();

        // last step, nothing can fail after this.
        state.id = gui.attach(WidgetKind::Numberbox, state.preferred_area())?;

        Ok(state)
    }

    /// Registry handle.
    #[inline]
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// Top left cell as placed by the gui.
    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Move the box.
    ///
    /// The gui still knows the old area until [relayout](Self::relayout).
    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Maximum display width. 0 means unbounded.
    #[inline]
    pub fn num_width(&self) -> u16 {
        self.num_width
    }

    /// Changes the preferred area, call [relayout](Self::relayout)
    /// to update the gui.
    pub fn set_num_width(&mut self, num_width: u16) {
        self.num_width = num_width;
        self.reformat();
    }

    /// Update the area registered with the gui after
    /// a move or resize.
    ///
    /// Returns false if the box isn't attached to this gui.
    pub fn relayout(&self, gui: &mut Gui) -> bool {
        gui.relayout(self.id, self.preferred_area())
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Set the value. Clamped to the range if there is one.
    pub fn set_value(&mut self, value: f64) {
        self.value = self.clamp(value);
        self.reformat();
    }

    /// Value range.
    #[inline]
    pub fn range(&self) -> Option<(f64, f64)> {
        self.range
    }

    /// Set the range. The current value is clamped.
    ///
    /// Bounds must be finite, a range with NaN or infinite bounds
    /// is ignored and the old range stays.
    pub fn set_range(&mut self, range: Option<(f64, f64)>) {
        if let Some((a, b)) = range {
            if !a.is_finite() || !b.is_finite() {
                warn!("numberbox {:?} range {:?} ignored", self.id, (a, b));
                return;
            }
        }
        self.range = range.map(|(a, b)| if a <= b { (a, b) } else { (b, a) });
        self.set_value(self.value);
    }

    #[inline]
    pub fn number_label(&self) -> &NumberLabel {
        &self.number_label
    }

    #[inline]
    pub fn number_label_formatter(&self) -> &NumberLabelFormatter {
        &self.number_label_formatter
    }

    /// Use a [format_num_pattern] pattern for the value.
    pub fn set_pattern<S: AsRef<str>>(&mut self, pattern: S) -> Result<(), NumberFmtError> {
        self.number_label_formatter.set_pattern(pattern)?;
        self.reformat();
        Ok(())
    }

    /// Back to the compact form.
    pub fn clear_pattern(&mut self) {
        self.number_label_formatter.clear_pattern();
        self.reformat();
    }

    pub fn set_locale(&mut self, locale: Locale) -> Result<(), NumberFmtError> {
        self.number_label_formatter.set_locale(locale)?;
        self.reformat();
        Ok(())
    }

    pub fn set_max_fraction_digits(&mut self, digits: u8) {
        self.number_label_formatter.set_max_fraction_digits(digits);
        self.reformat();
    }

    /// Descriptive label.
    #[inline]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    #[inline]
    pub fn label_pos(&self) -> LabelPos {
        self.label_pos
    }

    #[inline]
    pub fn receive_name(&self) -> Option<&str> {
        self.receive_name.as_deref()
    }

    #[inline]
    pub fn send_name(&self) -> Option<&str> {
        self.send_name.as_deref()
    }

    /// Area for rendering without a block, starting at the position.
    pub fn preferred_area(&self) -> Rect {
        let box_width = self.box_width();
        let label_width = self.label_width();
        let (width, height) = match self.label_pos {
            _ if label_width == 0 => (box_width, 1),
            LabelPos::Left | LabelPos::Right => {
                (box_width.saturating_add(1).saturating_add(label_width), 1)
            }
            LabelPos::Top | LabelPos::Bottom => (box_width.max(label_width), 2),
        };
        Rect::new(self.position.x, self.position.y, width, height)
    }

    /// Width of the value display.
    fn box_width(&self) -> u16 {
        if self.num_width > 0 {
            self.num_width
        } else {
            self.number_label.width().max(1)
        }
    }

    fn label_width(&self) -> u16 {
        self.label.as_deref().map(cell_width).unwrap_or(0)
    }

    fn clamp(&self, value: f64) -> f64 {
        match self.range {
            Some((min, max)) => value.clamp(min, max),
            None => value,
        }
    }

    fn reformat(&mut self) {
        let text = self.number_label_formatter.format(self.value, self.num_width);
        self.number_label.set_text(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gui() -> Gui {
        let mut gui = Gui::new();
        gui.set_parent_area(Rect::new(0, 0, 80, 24));
        gui
    }

    #[test]
    fn test_compact() {
        let f = NumberLabelFormatter::new();
        assert_eq!(f.format(0.0, 0), "0");
        assert_eq!(f.format(5.0, 0), "5");
        assert_eq!(f.format(1.5, 0), "1.5");
        assert_eq!(f.format(-2.25, 0), "-2.25");
        assert_eq!(f.format(100.0, 0), "100");
        assert_eq!(f.format(0.125, 0), "0.125");
    }

    #[test]
    fn test_fit() {
        let f = NumberLabelFormatter::new();
        assert_eq!(f.format(12345.0, 3), "12>");
        assert_eq!(f.format(12345.0, 5), "12345");
        assert_eq!(f.format(3.14159, 4), "3.14");
        assert_eq!(f.format(3.14159, 1), "3");
        assert_eq!(f.format(12345.0, 1), ">");
    }

    #[test]
    fn test_special() {
        let f = NumberLabelFormatter::new();
        assert_eq!(f.format(f64::NAN, 0), "nan");
        assert_eq!(f.format(f64::INFINITY, 0), "inf");
        assert_eq!(f.format(f64::NEG_INFINITY, 3), "-i>");
    }

    #[test]
    fn test_max_fraction() {
        let mut f = NumberLabelFormatter::new();
        f.set_max_fraction_digits(2);
        assert_eq!(f.format(1.0 / 3.0, 0), "0.33");
        f.set_max_fraction_digits(0);
        assert_eq!(f.format(7.25, 0), "7");
        f.set_max_fraction_digits(200);
        assert_eq!(f.max_fraction_digits(), MAX_FRACTION_DIGITS);
    }

    #[test]
    fn test_compact_cache() {
        let mut f = NumberLabelFormatter::new();
        assert_eq!(f.compact.len(), 7);
        f.set_max_fraction_digits(2);
        assert_eq!(f.compact.len(), 3);
        assert!(f.compact.iter().all(|v| v.is_some()));
        f.set_locale(Locale::de_DE).expect("locale");
        assert_eq!(f.compact.len(), 3);
        assert_eq!(f.format(1.0 / 3.0, 0), f.compact(1.0 / 3.0, 2));
    }

    #[test]
    fn test_pattern() {
        let mut f = NumberLabelFormatter::new();
        f.set_pattern("####0.00").expect("pattern");
        assert_eq!(f.pattern(), Some("####0.00"));
        assert_eq!(f.format(1234.0, 0), "1234.00");
        assert_eq!(f.format(1234.0, 5), "1234>");
        f.clear_pattern();
        assert_eq!(f.pattern(), None);
        assert_eq!(f.format(1234.0, 0), "1234");
    }

    #[test]
    fn test_label_pos() {
        assert_eq!(LabelPos::from_index(0), LabelPos::Left);
        assert_eq!(LabelPos::from_index(1), LabelPos::Right);
        assert_eq!(LabelPos::from_index(2), LabelPos::Top);
        assert_eq!(LabelPos::from_index(3), LabelPos::Bottom);
        assert_eq!(LabelPos::from_index(17), LabelPos::Left);
    }

    #[test]
    fn test_preferred_area() {
        let mut gui = gui();
        let state = NumberboxState::from_atom_line(
            &["floatatom", "14", "28", "5", "0", "0", "1", "freq", "-", "-"],
            &mut gui,
        )
        .expect("numberbox");
        assert_eq!(state.position(), Position::new(2, 2));
        assert_eq!(state.preferred_area(), Rect::new(2, 2, 10, 1));
        assert_eq!(
            gui.widget(state.id()).map(|v| v.area),
            Some(Rect::new(2, 2, 10, 1))
        );

        let state = NumberboxState::from_atom_line(
            &["floatatom", "0", "0", "0", "0", "0", "3", "gain", "-", "-"],
            &mut gui,
        )
        .expect("numberbox");
        assert_eq!(state.preferred_area(), Rect::new(0, 0, 4, 2));
    }
}
