//! Orthogonal wavelet bases.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::DenoiseError;

const HAAR: [f64; 2] = [std::f64::consts::FRAC_1_SQRT_2, std::f64::consts::FRAC_1_SQRT_2];

const DB2: [f64; 4] = [
    -0.129_409_522_551_260_37,
    0.224_143_868_041_013_4,
    0.836_516_303_737_807_9,
    0.482_962_913_144_534_16,
];

const DB3: [f64; 6] = [
    0.035_226_291_885_709_53,
    -0.085_441_273_882_026_66,
    -0.135_011_020_010_254_58,
    0.459_877_502_118_491_54,
    0.806_891_509_311_092_5,
    0.332_670_552_950_082_63,
];

const DB4: [f64; 8] = [
    -0.010_597_401_785_069_032,
    0.032_883_011_666_885_2,
    0.030_841_381_835_560_764,
    -0.187_034_811_719_093_09,
    -0.027_983_769_416_859_854,
    0.630_880_767_929_858_9,
    0.714_846_570_552_915_7,
    0.230_377_813_308_896_5,
];

const SYM4: [f64; 8] = [
    -0.075_765_714_789_273_33,
    -0.029_635_527_645_998_51,
    0.497_618_667_632_015_45,
    0.803_738_751_805_916_1,
    0.297_857_795_605_277_36,
    -0.099_219_543_576_847_22,
    -0.012_603_967_262_037_833,
    0.032_223_100_604_042_7,
];

const SYM5: [f64; 10] = [
    0.027_333_068_345_077_982,
    0.029_519_490_925_774_643,
    -0.039_134_249_302_383_094,
    0.199_397_533_977_393_6,
    0.723_407_690_402_420_6,
    0.633_978_963_458_211_9,
    0.016_602_105_764_522_32,
    -0.175_328_089_908_450_47,
    -0.021_101_834_024_758_855,
    0.019_538_882_735_286_728,
];

/// Supported wavelet bases, identified by their conventional short names.
///
/// `sym2` and `sym3` share their filters with `db2` and `db3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Wavelet {
    Haar,
    Db2,
    Db3,
    Db4,
    Sym2,
    Sym3,
    #[default]
    Sym4,
    Sym5,
}

impl Wavelet {
    pub const ALL: [Self; 8] = [
        Self::Haar,
        Self::Db2,
        Self::Db3,
        Self::Db4,
        Self::Sym2,
        Self::Sym3,
        Self::Sym4,
        Self::Sym5,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Haar => "haar",
            Self::Db2 => "db2",
            Self::Db3 => "db3",
            Self::Db4 => "db4",
            Self::Sym2 => "sym2",
            Self::Sym3 => "sym3",
            Self::Sym4 => "sym4",
            Self::Sym5 => "sym5",
        }
    }

    /// Low-pass (scaling) decomposition filter.
    #[must_use]
    pub const fn scaling_filter(&self) -> &'static [f64] {
        match self {
            Self::Haar => &HAAR,
            Self::Db2 | Self::Sym2 => &DB2,
            Self::Db3 | Self::Sym3 => &DB3,
            Self::Db4 => &DB4,
            Self::Sym4 => &SYM4,
            Self::Sym5 => &SYM5,
        }
    }

    /// High-pass (wavelet) filter, the quadrature mirror of the scaling filter.
    #[must_use]
    pub fn wavelet_filter(&self) -> Vec<f64> {
        let lo = self.scaling_filter();
        lo.iter()
            .rev()
            .enumerate()
            .map(|(n, &c)| if n % 2 == 0 { c } else { -c })
            .collect()
    }

    /// Number of filter taps.
    #[must_use]
    pub const fn filter_len(&self) -> usize {
        self.scaling_filter().len()
    }
}

impl fmt::Display for Wavelet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Wavelet {
    type Err = DenoiseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "haar" | "db1" => Ok(Self::Haar),
            "db2" => Ok(Self::Db2),
            "db3" => Ok(Self::Db3),
            "db4" => Ok(Self::Db4),
            "sym2" => Ok(Self::Sym2),
            "sym3" => Ok(Self::Sym3),
            "sym4" => Ok(Self::Sym4),
            "sym5" => Ok(Self::Sym5),
            _ => Err(DenoiseError::UnknownWavelet(s.to_string())),
        }
    }
}

impl Serialize for Wavelet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Wavelet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
