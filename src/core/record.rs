use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::error::{PlotError, PlotResult};

/// Season a record was observed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    pub const ALL: [Season; 4] = [
        Season::Summer,
        Season::Autumn,
        Season::Winter,
        Season::Spring,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Autumn => "Autumn",
            Season::Winter => "Winter",
        }
    }

    pub fn parse(text: &str) -> PlotResult<Self> {
        match text.trim() {
            "Spring" => Ok(Season::Spring),
            "Summer" => Ok(Season::Summer),
            "Autumn" => Ok(Season::Autumn),
            "Winter" => Ok(Season::Winter),
            other => Err(PlotError::DatasetLoad(format!("unknown season `{other}`"))),
        }
    }
}

/// Whether a record falls on a public holiday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Holiday {
    Holiday,
    NoHoliday,
}

impl Holiday {
    pub const ALL: [Holiday; 2] = [Holiday::Holiday, Holiday::NoHoliday];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Holiday::Holiday => "Holiday",
            Holiday::NoHoliday => "No Holiday",
        }
    }

    pub fn parse(text: &str) -> PlotResult<Self> {
        match text.trim() {
            "Holiday" => Ok(Holiday::Holiday),
            "No Holiday" => Ok(Holiday::NoHoliday),
            other => Err(PlotError::DatasetLoad(format!(
                "unknown holiday flag `{other}`"
            ))),
        }
    }
}

/// Whether the rental system was operating that day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FunctioningDay {
    No,
    Yes,
}

impl FunctioningDay {
    pub const ALL: [FunctioningDay; 2] = [FunctioningDay::No, FunctioningDay::Yes];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            FunctioningDay::No => "No",
            FunctioningDay::Yes => "Yes",
        }
    }

    pub fn parse(text: &str) -> PlotResult<Self> {
        match text.trim() {
            "No" => Ok(FunctioningDay::No),
            "Yes" => Ok(FunctioningDay::Yes),
            other => Err(PlotError::DatasetLoad(format!(
                "unknown functioning-day flag `{other}`"
            ))),
        }
    }
}

/// One bike-rental observation.
///
/// Records are immutable after load; a dataset reload replaces the whole
/// collection. `index` is assigned by row position and is the sole join key
/// for mark reconciliation and external-selection matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BikeRecord {
    pub index: usize,
    /// Raw date string as it appeared in the source file.
    pub date: String,
    /// Derived unix-seconds timestamp used for ordering and axis scaling.
    pub timestamp: i64,
    pub rented_bike_count: f64,
    pub hour: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub visibility: f64,
    pub dew_point_temperature: f64,
    pub solar_radiation: f64,
    pub rainfall: f64,
    pub snowfall: f64,
    pub season: Season,
    pub holiday: Holiday,
    pub functioning_day: FunctioningDay,
}

/// Spatial-axis attribute of a record.
///
/// `Date` projects to the derived unix-seconds timestamp, so domains and
/// positions stay numeric everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
    Date,
    RentedBikeCount,
    Hour,
    Temperature,
    Humidity,
    WindSpeed,
    Visibility,
    DewPointTemperature,
    SolarRadiation,
    Rainfall,
    Snowfall,
}

impl Attribute {
    pub const ALL: [Attribute; 11] = [
        Attribute::Date,
        Attribute::RentedBikeCount,
        Attribute::Hour,
        Attribute::Temperature,
        Attribute::Humidity,
        Attribute::WindSpeed,
        Attribute::Visibility,
        Attribute::DewPointTemperature,
        Attribute::SolarRadiation,
        Attribute::Rainfall,
        Attribute::Snowfall,
    ];

    /// Projects a record onto this attribute.
    #[must_use]
    pub fn value(self, record: &BikeRecord) -> f64 {
        match self {
            Attribute::Date => record.timestamp as f64,
            Attribute::RentedBikeCount => record.rented_bike_count,
            Attribute::Hour => record.hour,
            Attribute::Temperature => record.temperature,
            Attribute::Humidity => record.humidity,
            Attribute::WindSpeed => record.wind_speed,
            Attribute::Visibility => record.visibility,
            Attribute::DewPointTemperature => record.dew_point_temperature,
            Attribute::SolarRadiation => record.solar_radiation,
            Attribute::Rainfall => record.rainfall,
            Attribute::Snowfall => record.snowfall,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Attribute::Date => "Date",
            Attribute::RentedBikeCount => "Rented Bike Count",
            Attribute::Hour => "Hour",
            Attribute::Temperature => "Temperature",
            Attribute::Humidity => "Humidity",
            Attribute::WindSpeed => "Wind Speed",
            Attribute::Visibility => "Visibility",
            Attribute::DewPointTemperature => "Dew Point Temperature",
            Attribute::SolarRadiation => "Solar Radiation",
            Attribute::Rainfall => "Rainfall",
            Attribute::Snowfall => "Snowfall",
        }
    }

    /// Date axes format ticks as calendar dates and rotate the labels.
    #[must_use]
    pub fn is_date(self) -> bool {
        matches!(self, Attribute::Date)
    }
}

/// Categorical attribute driving the scatterplot color/size encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoricalAttribute {
    Seasons,
    Holiday,
    FunctioningDay,
}

impl CategoricalAttribute {
    pub const ALL: [CategoricalAttribute; 3] = [
        CategoricalAttribute::Seasons,
        CategoricalAttribute::Holiday,
        CategoricalAttribute::FunctioningDay,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            CategoricalAttribute::Seasons => "Seasons",
            CategoricalAttribute::Holiday => "Holiday",
            CategoricalAttribute::FunctioningDay => "Functioning Day",
        }
    }
}

/// Immutable-per-load ordered collection of records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    records: Vec<BikeRecord>,
}

impl Dataset {
    /// Wraps already-indexed records, verifying the positional index
    /// invariant the rest of the crate relies on.
    pub fn new(records: Vec<BikeRecord>) -> PlotResult<Self> {
        for (position, record) in records.iter().enumerate() {
            if record.index != position {
                return Err(PlotError::InvalidData(format!(
                    "record at position {position} carries index {}",
                    record.index
                )));
            }
        }
        Ok(Self { records })
    }

    #[must_use]
    pub fn records(&self) -> &[BikeRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BikeRecord> {
        self.records.iter()
    }

    /// `[min, max]` of the dataset projected onto `attribute`.
    ///
    /// Returns `None` for an empty dataset.
    #[must_use]
    pub fn domain(&self, attribute: Attribute) -> Option<(f64, f64)> {
        let min = self
            .records
            .iter()
            .map(|record| OrderedFloat(attribute.value(record)))
            .min()?;
        let max = self
            .records
            .iter()
            .map(|record| OrderedFloat(attribute.value(record)))
            .max()?;
        Some((min.into_inner(), max.into_inner()))
    }
}
