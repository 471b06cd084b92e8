// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Per-property value managers.
//!
//! A manager knows how to parse a property value from lexical units,
//! what the default value is and how a specified value becomes a computed one.

use csslex::LexicalUnit;

use crate::style_map::{flags, StyleMap};
use crate::value::{constants, FloatValue, PrimitiveType, Value};
use crate::{Error, Options};

mod color;
mod cursor;
mod enable_background;
mod font;
mod identifier;
mod length;
mod rect;
mod text;
mod uri;

pub use color::{ColorManager, PaintManager};
pub use cursor::CursorManager;
pub use enable_background::EnableBackgroundManager;
pub use font::{FontFamilyManager, FontSizeAdjustManager, FontSizeManager, FontWeightManager};
pub use identifier::IdentifierManager;
pub use length::{LengthManager, NumberManager, StrokeDasharrayManager};
pub use rect::ClipManager;
pub use text::{GlyphOrientationManager, TextDecorationManager};
pub use uri::{ColorProfileManager, UriManager};

/// A property value type.
///
/// Describes which values a property accepts, mainly for animation code.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PropertyType {
    Ident,
    Length,
    LengthOrIdent,
    LengthList,
    Number,
    NumberOrIdent,
    Angle,
    AngleOrIdent,
    Color,
    Paint,
    UriOrIdent,
    FontFamily,
    FontSize,
    FontWeight,
    Rect,
    Cursor,
    EnableBackground,
    IdentList,
    ColorProfile,
}

/// A percentage base for lengths.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Orientation {
    /// Relative to the viewport width.
    Horizontal,
    /// Relative to the viewport height.
    Vertical,
    /// Relative to the normalized viewport diagonal.
    Both,
}

/// A property value manager.
pub trait ValueManager: Send + Sync {
    /// Returns the property name.
    fn property_name(&self) -> &'static str;

    /// Checks that the property is inherited by default.
    fn is_inherited(&self) -> bool;

    /// Checks that the property can be animated.
    fn is_animatable(&self) -> bool {
        true
    }

    /// Checks that the property supports additive animation.
    fn is_additive(&self) -> bool {
        false
    }

    /// Returns the property value type.
    fn property_type(&self) -> PropertyType;

    /// Returns the initial value.
    fn default_value(&self) -> Value;

    /// Creates a specified value from lexical units.
    fn create_value(&self, units: &[LexicalUnit]) -> Result<Value, Error>;

    /// Resolves a specified value into a computed one.
    ///
    /// The value is never `inherit`, that is resolved by the cascade.
    fn compute_value(&self, value: &Value, _ctx: &mut ComputeContext) -> Value {
        value.clone()
    }

    /// Computes the initial value.
    ///
    /// Used only when nothing was cascaded or inherited, so a specified value
    /// that happens to equal the initial one is never affected.
    fn compute_default_value(&self, ctx: &mut ComputeContext) -> Value {
        self.compute_value(&self.default_value(), ctx)
    }
}

impl std::fmt::Debug for dyn ValueManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ValueManager({})", self.property_name())
    }
}

/// An element state available during value computation.
pub struct ComputeContext<'a> {
    options: &'a Options,
    parent: Option<&'a StyleMap>,
    font_size_index: usize,
    font_size: Option<f32>,
    color: Option<Value>,
    flags: u16,
}

impl<'a> ComputeContext<'a> {
    /// Creates a new context.
    ///
    /// `parent` is the computed style of the parent element, if any.
    pub fn new(options: &'a Options, parent: Option<&'a StyleMap>, font_size_index: usize) -> Self {
        ComputeContext {
            options,
            parent,
            font_size_index,
            font_size: None,
            color: None,
            flags: 0,
        }
    }

    /// Returns processing options.
    pub fn options(&self) -> &Options {
        self.options
    }

    /// Returns a computed value of the parent element.
    pub fn parent_value(&self, index: usize) -> Option<&Value> {
        self.parent.and_then(|p| p.value(index))
    }

    /// Returns the computed font size of the parent element,
    /// or the `medium` size for the root.
    pub fn parent_font_size(&self) -> f32 {
        self.parent_value(self.font_size_index)
            .and_then(|v| v.as_float())
            .unwrap_or(self.options.font_size)
    }

    /// Returns the computed font size of the element.
    pub fn font_size(&self) -> f32 {
        self.font_size.unwrap_or_else(|| self.parent_font_size())
    }

    /// Returns the computed `color` of the element.
    pub fn current_color(&self) -> Value {
        self.color
            .clone()
            .unwrap_or(Value::Rgb(constants::BLACK_RGB))
    }

    /// Returns the viewport width.
    pub fn block_width(&self) -> f32 {
        self.options.viewport_size.0
    }

    /// Returns the viewport height.
    pub fn block_height(&self) -> f32 {
        self.options.viewport_size.1
    }

    /// Marks the current value as depending on the element font size.
    pub fn set_font_size_relative(&mut self) {
        self.flags |= flags::FONT_SIZE_RELATIVE;
    }

    /// Marks the current value as depending on `color`.
    pub fn set_color_relative(&mut self) {
        self.flags |= flags::COLOR_RELATIVE;
    }

    /// Marks the current value as depending on the parent style.
    pub fn set_parent_relative(&mut self) {
        self.flags |= flags::PARENT_RELATIVE;
    }

    /// Marks the current value as depending on the viewport width.
    pub fn set_block_width_relative(&mut self) {
        self.flags |= flags::BLOCK_WIDTH_RELATIVE;
    }

    /// Marks the current value as depending on the viewport height.
    pub fn set_block_height_relative(&mut self) {
        self.flags |= flags::BLOCK_HEIGHT_RELATIVE;
    }

    pub(crate) fn set_font_size(&mut self, size: f32) {
        self.font_size = Some(size);
    }

    pub(crate) fn set_color(&mut self, color: Value) {
        self.color = Some(color);
    }

    pub(crate) fn take_flags(&mut self) -> u16 {
        std::mem::replace(&mut self.flags, 0)
    }
}

impl std::fmt::Debug for ComputeContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComputeContext")
            .field("font_size", &self.font_size)
            .field("color", &self.color)
            .finish_non_exhaustive()
    }
}

pub(crate) fn invalid_unit(lu: &LexicalUnit) -> Error {
    Error::InvalidLexicalUnit(Some(lu.unit_type()))
}

// `inherit` wins as soon as it's the first unit.
pub(crate) fn is_inherit(units: &[LexicalUnit]) -> bool {
    matches!(units.first(), Some(LexicalUnit::Inherit))
}

/// Returns the only unit of a value.
pub(crate) fn single_unit(units: &[LexicalUnit]) -> Result<&LexicalUnit, Error> {
    match units {
        [lu] => Ok(lu),
        [] => Err(Error::InvalidLexicalUnit(None)),
        [_, next, ..] => Err(invalid_unit(next)),
    }
}

/// Parses a length, a percentage or a unitless number.
pub(crate) fn create_length(lu: &LexicalUnit) -> Result<FloatValue, Error> {
    match FloatValue::from_lexical_unit(lu) {
        Some(v) if v.unit.is_length() => Ok(v),
        _ => Err(invalid_unit(lu)),
    }
}

/// Parses an integer or a real.
pub(crate) fn create_number(lu: &LexicalUnit) -> Result<FloatValue, Error> {
    match *lu {
        LexicalUnit::Integer(n) => Ok(FloatValue::number(n as f32)),
        LexicalUnit::Real(n) => Ok(FloatValue::number(n)),
        _ => Err(invalid_unit(lu)),
    }
}

/// Converts a length into user units.
pub(crate) fn compute_length(
    v: FloatValue,
    orientation: Orientation,
    ctx: &mut ComputeContext,
) -> FloatValue {
    let px_to_mm = ctx.options().pixel_unit_to_millimeter();
    let n = v.value;
    let n = match v.unit {
        PrimitiveType::Number | PrimitiveType::Px => n,
        PrimitiveType::Mm => n / px_to_mm,
        PrimitiveType::Cm => n * 10.0 / px_to_mm,
        PrimitiveType::In => n * 25.4 / px_to_mm,
        PrimitiveType::Pt => n * 25.4 / (72.0 * px_to_mm),
        PrimitiveType::Pc => n * 25.4 / (6.0 * px_to_mm),
        PrimitiveType::Em => {
            ctx.set_font_size_relative();
            n * ctx.font_size()
        }
        PrimitiveType::Ex => {
            ctx.set_font_size_relative();
            n * ctx.font_size() * 0.5
        }
        PrimitiveType::Percentage => match orientation {
            Orientation::Horizontal => {
                ctx.set_block_width_relative();
                n * ctx.block_width() / 100.0
            }
            Orientation::Vertical => {
                ctx.set_block_height_relative();
                n * ctx.block_height() / 100.0
            }
            Orientation::Both => {
                ctx.set_block_width_relative();
                ctx.set_block_height_relative();
                let w = ctx.block_width() as f64;
                let h = ctx.block_height() as f64;
                (n as f64 * ((w * w + h * h).sqrt() / 2f64.sqrt()) / 100.0) as f32
            }
        },
        _ => return v,
    };

    FloatValue::number(n)
}

/// Converts a value into user units, if it's a length.
pub(crate) fn compute_length_value(
    value: &Value,
    orientation: Orientation,
    ctx: &mut ComputeContext,
) -> Value {
    match *value {
        Value::Float(v) => Value::Float(compute_length(v, orientation, ctx)),
        _ => value.clone(),
    }
}
