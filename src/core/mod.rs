pub mod interval;
pub mod palette;
pub mod record;
pub mod scale;
pub mod ticks;
pub mod types;

pub use interval::{Interval, between};
pub use record::{
    Attribute, BikeRecord, CategoricalAttribute, Dataset, FunctioningDay, Holiday, Season,
};
pub use scale::LinearScale;
pub use types::{Margin, PlotArea, Viewport};
