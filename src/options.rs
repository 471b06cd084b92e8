// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// A shorthand for [`Options::style_sheet_resolver`] function.
///
/// Called with an `xml-stylesheet` `href` value. Returns the style sheet text.
pub type StyleSheetResolverFn = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Processing options.
pub struct Options {
    /// Target DPI.
    ///
    /// Impacts absolute units conversion.
    ///
    /// Default: 96.0
    pub dpi: f32,

    /// A default font family.
    ///
    /// Replaces the user agent `font-family` value during computation.
    /// Parsed like a `font-family` declaration.
    ///
    /// Default: `Arial, Helvetica, sans-serif`
    pub font_family: String,

    /// The `medium` font size.
    ///
    /// Will be used when no `font-size` property is set.
    ///
    /// Default: 12
    pub font_size: f32,

    /// The viewport size used to resolve percentages.
    ///
    /// Default: `(100, 100)`
    pub viewport_size: (f32, f32),

    /// A user style sheet.
    ///
    /// Sits between the user agent and the author style sheets in the cascade.
    ///
    /// Default: `None`
    pub user_style_sheet: Option<String>,

    /// Loads style sheets referenced by `xml-stylesheet` processing instructions.
    ///
    /// Default: `None`, so such style sheets are ignored.
    pub style_sheet_resolver: Option<StyleSheetResolverFn>,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            dpi: 96.0,
            // Default font is user-agent dependent so we can use whichever we like.
            font_family: "Arial, Helvetica, sans-serif".to_string(),
            font_size: 12.0,
            viewport_size: (100.0, 100.0),
            user_style_sheet: None,
            style_sheet_resolver: None,
        }
    }
}

impl Options {
    /// Returns the size of a pixel in millimeters.
    pub fn pixel_unit_to_millimeter(&self) -> f32 {
        25.4 / self.dpi
    }
}

impl std::fmt::Debug for Options {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Options")
            .field("dpi", &self.dpi)
            .field("font_family", &self.font_family)
            .field("font_size", &self.font_size)
            .field("viewport_size", &self.viewport_size)
            .field("user_style_sheet", &self.user_style_sheet)
            .finish_non_exhaustive()
    }
}
