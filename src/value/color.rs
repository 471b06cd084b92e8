// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fmt;

use super::write_number;
use crate::Error;

/// The D50 standard illuminant.
pub const D50: [f32; 3] = [96.42, 100.0, 82.49];

/// The D65 standard illuminant.
pub const D65: [f32; 3] = [95.047, 100.0, 108.883];

fn check_channel(index: usize, len: usize) -> Result<(), Error> {
    if index < len {
        Ok(())
    } else {
        Err(Error::ChannelOutOfRange { index, len })
    }
}

fn write_channels(f: &mut fmt::Formatter, channels: &[f32]) -> fmt::Result {
    for (i, c) in channels.iter().enumerate() {
        if i != 0 {
            write!(f, ", ")?;
        }

        write_number(f, *c)?;
    }

    Ok(())
}

/// A CIE color space.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CieKind {
    Lab,
    Lch,
}

impl CieKind {
    /// Returns the CSS function name.
    pub fn function_name(self) -> &'static str {
        match self {
            CieKind::Lab => "cielab",
            CieKind::Lch => "cielch",
        }
    }

    /// Returns the white point used when none is specified.
    pub fn default_white_point(self) -> [f32; 3] {
        match self {
            CieKind::Lab => D65,
            CieKind::Lch => D50,
        }
    }
}

/// A `cielab()` or `cielch()` color.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct CieColor {
    kind: CieKind,
    values: [f32; 3],
    white_point: [f32; 3],
}

impl CieColor {
    /// Creates a color with the default white point.
    pub fn new(kind: CieKind, values: [f32; 3]) -> Self {
        CieColor::with_white_point(kind, values, kind.default_white_point())
    }

    /// Creates a color with an explicit white point.
    pub fn with_white_point(kind: CieKind, values: [f32; 3], white_point: [f32; 3]) -> Self {
        CieColor {
            kind,
            values,
            white_point,
        }
    }

    /// Returns the color space.
    pub fn kind(&self) -> CieKind {
        self.kind
    }

    /// Returns a copy of the channel values.
    pub fn color_values(&self) -> [f32; 3] {
        self.values
    }

    /// Returns a copy of the white point.
    pub fn white_point(&self) -> [f32; 3] {
        self.white_point
    }

    /// Returns the number of channels. Always 3.
    pub fn number_of_channels(&self) -> usize {
        self.values.len()
    }

    /// Returns a channel value.
    pub fn channel(&self, index: usize) -> Result<f32, Error> {
        check_channel(index, self.values.len())?;
        Ok(self.values[index])
    }
}

impl fmt::Display for CieColor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}(", self.kind.function_name())?;
        write_channels(f, &self.values)?;
        write!(f, ")")
    }
}

/// A `device-gray()`, `device-rgb()`, `device-cmyk()` or `device-nchannel()` color.
#[derive(Clone, PartialEq, Debug)]
pub struct DeviceColor {
    n_channel: bool,
    channels: Vec<f32>,
}

impl DeviceColor {
    /// Creates an empty color.
    ///
    /// `n_channel` marks a `device-nchannel()` color, which accepts any number of channels.
    pub fn new(n_channel: bool) -> Self {
        DeviceColor {
            n_channel,
            channels: Vec::with_capacity(4),
        }
    }

    /// Appends a channel.
    pub fn append(&mut self, value: f32) {
        self.channels.push(value);
    }

    /// Checks that the color is a `device-nchannel()` color.
    pub fn is_n_channel(&self) -> bool {
        self.n_channel
    }

    /// Returns the number of channels.
    pub fn number_of_channels(&self) -> usize {
        self.channels.len()
    }

    /// Returns a channel value.
    pub fn channel(&self, index: usize) -> Result<f32, Error> {
        check_channel(index, self.channels.len())?;
        Ok(self.channels[index])
    }

    /// Returns a copy of all channels.
    pub fn channels(&self) -> Vec<f32> {
        self.channels.clone()
    }

    /// Returns the CSS function name picked by the channel count.
    ///
    /// # Errors
    ///
    /// `InternalConsistency` when the count has no function and the color isn't N-channel.
    pub fn function_name(&self) -> Result<&'static str, Error> {
        if self.n_channel {
            return Ok("device-nchannel");
        }

        match self.channels.len() {
            1 => Ok("device-gray"),
            3 => Ok("device-rgb"),
            4 => Ok("device-cmyk"),
            _ => Err(Error::InternalConsistency(
                "invalid number of components used for a device color",
            )),
        }
    }

    /// Returns the canonical CSS text.
    pub fn css_text(&self) -> Result<String, Error> {
        self.function_name()?;
        Ok(self.to_string())
    }
}

impl fmt::Display for DeviceColor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Any channel count is valid for `device-nchannel()`.
        let name = match self.function_name() {
            Ok(name) => name,
            Err(e) => {
                log::warn!("{}.", e);
                "device-nchannel"
            }
        };

        write!(f, "{}(", name)?;
        write_channels(f, &self.channels)?;
        write!(f, ")")
    }
}

/// An `icc-color()`.
#[derive(Clone, PartialEq, Debug)]
pub struct IccColor {
    profile: String,
    channels: Vec<f32>,
}

impl IccColor {
    /// Creates a color without channels.
    pub fn new(profile: &str) -> Self {
        IccColor {
            profile: profile.to_string(),
            channels: Vec::new(),
        }
    }

    /// Appends a channel.
    pub fn append(&mut self, value: f32) {
        self.channels.push(value);
    }

    /// Returns the color profile name.
    pub fn profile(&self) -> &str {
        &self.profile
    }

    /// Returns the number of channels.
    pub fn number_of_channels(&self) -> usize {
        self.channels.len()
    }

    /// Returns a channel value.
    pub fn channel(&self, index: usize) -> Result<f32, Error> {
        check_channel(index, self.channels.len())?;
        Ok(self.channels[index])
    }
}

impl fmt::Display for IccColor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "icc-color({}", self.profile)?;
        for c in &self.channels {
            write!(f, ", ")?;
            write_number(f, *c)?;
        }
        write!(f, ")")
    }
}

/// An `icc-named-color()`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct IccNamedColor {
    profile: String,
    name: String,
}

impl IccNamedColor {
    /// Creates a new color.
    pub fn new(profile: &str, name: &str) -> Self {
        IccNamedColor {
            profile: profile.to_string(),
            name: name.to_string(),
        }
    }

    /// Returns the color profile name.
    pub fn profile(&self) -> &str {
        &self.profile
    }

    /// Returns the color name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for IccNamedColor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "icc-named-color({}, {})", self.profile, self.name)
    }
}

#[rustfmt::skip]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cie_lab_default_white_point() {
        let c = CieColor::new(CieKind::Lab, [50.0, 10.0, -20.0]);
        assert_eq!(c.white_point(), D65);
        assert_eq!(c.to_string(), "cielab(50, 10, -20)");
    }

    #[test]
    fn cie_lch_default_white_point() {
        let c = CieColor::new(CieKind::Lch, [50.0, 10.5, 90.0]);
        assert_eq!(c.white_point(), D50);
        assert_eq!(c.to_string(), "cielch(50, 10.5, 90)");
    }

    #[test]
    fn cie_copies_do_not_alias() {
        let c = CieColor::new(CieKind::Lab, [1.0, 2.0, 3.0]);
        let mut values = c.color_values();
        values[0] = 100.0;
        let mut wp = c.white_point();
        wp[1] = 0.0;
        assert_eq!(c.color_values(), [1.0, 2.0, 3.0]);
        assert_eq!(c.white_point(), D65);
    }

    #[test]
    fn cie_channel_out_of_range() {
        let c = CieColor::new(CieKind::Lab, [1.0, 2.0, 3.0]);
        assert_eq!(c.channel(2).unwrap(), 3.0);
        assert!(matches!(c.channel(3), Err(Error::ChannelOutOfRange { index: 3, len: 3 })));
    }

    macro_rules! test_device {
        ($name:ident, $n_channel:expr, $channels:expr, $text:expr) => (
            #[test]
            fn $name() {
                let mut c = DeviceColor::new($n_channel);
                for v in $channels.iter() {
                    c.append(*v);
                }
                assert_eq!(c.css_text().unwrap(), $text);
            }
        )
    }

    test_device!(device_1, false, [0.5], "device-gray(0.5)");
    test_device!(device_2, false, [1.0, 0.0, 0.25], "device-rgb(1, 0, 0.25)");
    test_device!(device_3, false, [0.1, 0.2, 0.3, 0.4], "device-cmyk(0.1, 0.2, 0.3, 0.4)");
    test_device!(device_4, true, [0.1, 0.2, 0.3, 0.4, 0.5], "device-nchannel(0.1, 0.2, 0.3, 0.4, 0.5)");
    test_device!(device_5, true, [0.1], "device-nchannel(0.1)");

    #[test]
    fn device_invalid_count() {
        let mut c = DeviceColor::new(false);
        c.append(0.1);
        c.append(0.2);
        assert!(matches!(c.css_text(), Err(Error::InternalConsistency(_))));
    }

    #[test]
    fn device_grows() {
        let mut c = DeviceColor::new(true);
        for i in 0..9 {
            c.append(i as f32);
        }
        assert_eq!(c.number_of_channels(), 9);
        assert_eq!(c.channel(8).unwrap(), 8.0);
        assert!(c.channel(9).is_err());
    }

    #[test]
    fn icc_colors() {
        let mut c = IccColor::new("prof");
        c.append(0.5);
        c.append(1.0);
        assert_eq!(c.to_string(), "icc-color(prof, 0.5, 1)");
        assert!(c.channel(2).is_err());

        let n = IccNamedColor::new("prof", "gold");
        assert_eq!(n.to_string(), "icc-named-color(prof, gold)");
    }
}
