// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Shared keywords.
//!
//! Every keyword value produced by the crate points to one of the strings below,
//! so keywords can be compared by address with [`Value::is_same_keyword`].

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::{ListValue, RgbColor, Value};

macro_rules! keywords {
    ($($name:ident = $text:expr;)+) => {
        $(
            #[allow(missing_docs)]
            pub static $name: &str = $text;
        )+

        static KEYWORDS: Lazy<HashMap<String, &'static str>> = Lazy::new(|| {
            let mut map = HashMap::new();
            $(
                map.insert($name.to_ascii_lowercase(), $name);
            )+
            map
        });
    };
}

keywords! {
    ACCUMULATE = "accumulate";
    AFTER_EDGE = "after-edge";
    ALL = "all";
    ALPHABETIC = "alphabetic";
    AUTO = "auto";
    BASELINE = "baseline";
    BEFORE_EDGE = "before-edge";
    BEVEL = "bevel";
    BIDI_OVERRIDE = "bidi-override";
    BLINK = "blink";
    BLOCK = "block";
    BOLD = "bold";
    BOLDER = "bolder";
    BUTT = "butt";
    CENTRAL = "central";
    COLLAPSE = "collapse";
    COMPACT = "compact";
    CONDENSED = "condensed";
    CRISP_EDGES = "crispEdges";
    CROSSHAIR = "crosshair";
    CURRENT_COLOR = "currentColor";
    CURSIVE = "cursive";
    DEFAULT = "default";
    E_RESIZE = "e-resize";
    EMBED = "embed";
    END = "end";
    EVENODD = "evenodd";
    EXPANDED = "expanded";
    EXTRA_CONDENSED = "extra-condensed";
    EXTRA_EXPANDED = "extra-expanded";
    FANTASY = "fantasy";
    FILL = "fill";
    GEOMETRIC_PRECISION = "geometricPrecision";
    HANGING = "hanging";
    HELP = "help";
    HIDDEN = "hidden";
    IDEOGRAPHIC = "ideographic";
    INLINE = "inline";
    INLINE_TABLE = "inline-table";
    ITALIC = "italic";
    LARGE = "large";
    LARGER = "larger";
    LIGHTER = "lighter";
    LINE_THROUGH = "line-through";
    LINEAR_RGB = "linearRGB";
    LIST_ITEM = "list-item";
    LR = "lr";
    LR_TB = "lr-tb";
    LTR = "ltr";
    MARKER = "marker";
    MATHEMATICAL = "mathematical";
    MEDIUM = "medium";
    MIDDLE = "middle";
    MITER = "miter";
    MONOSPACE = "monospace";
    MOVE = "move";
    N_RESIZE = "n-resize";
    NARROWER = "narrower";
    NE_RESIZE = "ne-resize";
    NEW = "new";
    NO_CHANGE = "no-change";
    NONE = "none";
    NONZERO = "nonzero";
    NORMAL = "normal";
    NW_RESIZE = "nw-resize";
    OBLIQUE = "oblique";
    OPTIMIZE_LEGIBILITY = "optimizeLegibility";
    OPTIMIZE_QUALITY = "optimizeQuality";
    OPTIMIZE_SPEED = "optimizeSpeed";
    OVERLINE = "overline";
    PAINTED = "painted";
    POINTER = "pointer";
    RESET_SIZE = "reset-size";
    RL = "rl";
    RL_TB = "rl-tb";
    ROUND = "round";
    RTL = "rtl";
    RUN_IN = "run-in";
    S_RESIZE = "s-resize";
    SANS_SERIF = "sans-serif";
    SCROLL = "scroll";
    SE_RESIZE = "se-resize";
    SEMI_CONDENSED = "semi-condensed";
    SEMI_EXPANDED = "semi-expanded";
    SERIF = "serif";
    SMALL = "small";
    SMALL_CAPS = "small-caps";
    SMALLER = "smaller";
    SQUARE = "square";
    SRGB = "sRGB";
    START = "start";
    STROKE = "stroke";
    SUB = "sub";
    SUPER = "super";
    SW_RESIZE = "sw-resize";
    TABLE = "table";
    TABLE_CAPTION = "table-caption";
    TABLE_CELL = "table-cell";
    TABLE_COLUMN = "table-column";
    TABLE_COLUMN_GROUP = "table-column-group";
    TABLE_FOOTER_GROUP = "table-footer-group";
    TABLE_HEADER_GROUP = "table-header-group";
    TABLE_ROW = "table-row";
    TABLE_ROW_GROUP = "table-row-group";
    TB = "tb";
    TB_RL = "tb-rl";
    TEXT = "text";
    TEXT_AFTER_EDGE = "text-after-edge";
    TEXT_BEFORE_EDGE = "text-before-edge";
    TEXT_BOTTOM = "text-bottom";
    TEXT_TOP = "text-top";
    ULTRA_CONDENSED = "ultra-condensed";
    ULTRA_EXPANDED = "ultra-expanded";
    UNDERLINE = "underline";
    USE_SCRIPT = "use-script";
    VISIBLE = "visible";
    VISIBLE_FILL = "visibleFill";
    VISIBLE_PAINTED = "visiblePainted";
    VISIBLE_STROKE = "visibleStroke";
    W_RESIZE = "w-resize";
    WAIT = "wait";
    WIDER = "wider";
    X_LARGE = "x-large";
    X_SMALL = "x-small";
    XX_LARGE = "xx-large";
    XX_SMALL = "xx-small";
}

/// Black, as `rgb(0, 0, 0)`.
pub const BLACK_RGB: RgbColor = RgbColor::new(0.0, 0.0, 0.0);

/// White, as `rgb(255, 255, 255)`.
pub const WHITE_RGB: RgbColor = RgbColor::new(255.0, 255.0, 255.0);

/// The user agent font family: `"Arial", "Helvetica", sans-serif`.
///
/// Replaced with the configured default family when nothing is cascaded or inherited.
pub static DEFAULT_FONT_FAMILY: Lazy<Value> = Lazy::new(|| {
    Value::List(ListValue::from_items(
        ',',
        vec![
            Value::String("Arial".to_string()),
            Value::String("Helvetica".to_string()),
            Value::Ident(SANS_SERIF),
        ],
    ))
});

/// Returns the shared keyword matching `name`, ignoring ASCII case.
pub fn intern(name: &str) -> Option<&'static str> {
    KEYWORDS.get(&name.to_ascii_lowercase()).copied()
}

// Keywords from static tables are expected to be known. An unknown one is used as is,
// which is still a single address as long as the table is the only place that uses it.
pub(crate) fn intern_static(name: &'static str) -> &'static str {
    intern(name).unwrap_or(name)
}

/// A keyword-to-value lookup table.
///
/// Keys are matched ignoring ASCII case and always resolve to shared keywords.
#[derive(Clone, Debug)]
pub struct StringMap {
    map: HashMap<String, &'static str>,
}

impl StringMap {
    /// Creates a table from keywords.
    pub fn new(keywords: &[&'static str]) -> Self {
        let mut map = HashMap::with_capacity(keywords.len());
        for name in keywords {
            let keyword = intern_static(name);
            map.insert(keyword.to_ascii_lowercase(), keyword);
        }

        StringMap { map }
    }

    /// Returns the shared keyword value.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.get_keyword(key).map(Value::Ident)
    }

    /// Returns the shared keyword.
    pub fn get_keyword(&self, key: &str) -> Option<&'static str> {
        self.map.get(&key.to_ascii_lowercase()).copied()
    }

    /// Returns the number of keywords.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Checks that the table is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
