/// One of the six fixed ranges of the magnitude axis used for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MagnitudeBand {
    /// (-inf, 1)
    Minor,
    /// [1, 2)
    Light,
    /// [2, 3)
    Moderate,
    /// [3, 4)
    Strong,
    /// [4, 5)
    Major,
    /// [5, inf)
    Great,
}

struct BandInfo {
    band: MagnitudeBand,
    threshold: f64,
    color: &'static str,
    multiplier: f64,
    label: &'static str,
}

// Ordered from the highest threshold down; lookup takes the first match.
static BANDS: [BandInfo; 6] = [
    BandInfo { band: MagnitudeBand::Great, threshold: 5.0, color: "#d73027", multiplier: 35000.0, label: "5+" },
    BandInfo { band: MagnitudeBand::Major, threshold: 4.0, color: "#fc8d59", multiplier: 30000.0, label: "4-5" },
    BandInfo { band: MagnitudeBand::Strong, threshold: 3.0, color: "#fee08b", multiplier: 25000.0, label: "3-4" },
    BandInfo { band: MagnitudeBand::Moderate, threshold: 2.0, color: "#d9ef8b", multiplier: 20000.0, label: "2-3" },
    BandInfo { band: MagnitudeBand::Light, threshold: 1.0, color: "#91cf60", multiplier: 15000.0, label: "1-2" },
    BandInfo { band: MagnitudeBand::Minor, threshold: f64::NEG_INFINITY, color: "#1a9850", multiplier: 10000.0, label: "0-1" },
];

impl MagnitudeBand {
    /// All bands in ascending order, as listed in the legend.
    pub const ASCENDING: [MagnitudeBand; 6] = [
        MagnitudeBand::Minor,
        MagnitudeBand::Light,
        MagnitudeBand::Moderate,
        MagnitudeBand::Strong,
        MagnitudeBand::Major,
        MagnitudeBand::Great,
    ];

    fn info(self) -> &'static BandInfo {
        let index = match self {
            MagnitudeBand::Great => 0,
            MagnitudeBand::Major => 1,
            MagnitudeBand::Strong => 2,
            MagnitudeBand::Moderate => 3,
            MagnitudeBand::Light => 4,
            MagnitudeBand::Minor => 5,
        };
        &BANDS[index]
    }

    pub fn color(self) -> &'static str {
        self.info().color
    }

    pub fn multiplier(self) -> f64 {
        self.info().multiplier
    }

    pub fn label(self) -> &'static str {
        self.info().label
    }

    /// Smallest whole magnitude that belongs to this band (0 for the lowest band).
    pub fn lower_bound(self) -> f64 {
        match self {
            MagnitudeBand::Minor => 0.0,
            other => other.info().threshold,
        }
    }
}

/// Classifies a magnitude. Thresholds are tested from 5 down to 1, so boundary
/// values belong to the higher band and anything below 1 (negative and NaN
/// included) lands in the lowest band.
pub fn band_for(magnitude: f64) -> MagnitudeBand {
    BANDS
        .iter()
        .find(|info| magnitude >= info.threshold)
        .map(|info| info.band)
        .unwrap_or(MagnitudeBand::Minor)
}

pub fn color_for(magnitude: f64) -> &'static str {
    band_for(magnitude).color()
}

/// Display radius in map metres. Scales the raw magnitude, so a negative
/// magnitude gives a negative radius.
pub fn radius_for(magnitude: f64) -> f64 {
    magnitude * band_for(magnitude).multiplier()
}
