//! Year/day lookup of solver factories, filled by hand or from plugins

use crate::error::{ParseError, RegistrationError, SolverError};
use crate::instance::{DynSolver, SolverInstance};
use crate::solver::Solver;

/// First Advent of Code event
pub const FIRST_YEAR: u16 = 2015;
/// Events covered by the registry, starting at [`FIRST_YEAR`]
pub const YEARS: usize = 20;
/// Puzzles per event
pub const DAYS: usize = 25;

/// Position of a year/day in the registry's flat table
///
/// Slots are laid out year-major, so iterating slots in order visits puzzles
/// in (year, day) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slot(usize);

impl Slot {
    /// Number of slots in the table
    pub const COUNT: usize = YEARS * DAYS;

    /// `None` unless `year` is in `FIRST_YEAR..FIRST_YEAR + YEARS` and `day`
    /// in `1..=25`
    pub fn new(year: u16, day: u8) -> Option<Self> {
        let year_offset = year.checked_sub(FIRST_YEAR)? as usize;
        if year_offset >= YEARS || !(1..=DAYS as u8).contains(&day) {
            return None;
        }
        Some(Slot(year_offset * DAYS + (day - 1) as usize))
    }

    pub fn index(self) -> usize {
        self.0
    }

    pub fn year_day(self) -> (u16, u8) {
        (
            FIRST_YEAR + (self.0 / DAYS) as u16,
            (self.0 % DAYS) as u8 + 1,
        )
    }
}

/// Parses an input into a ready instance; shared across threads
pub type SolverFactory =
    Box<dyn for<'a> Fn(&'a str) -> Result<Box<dyn DynSolver + 'a>, ParseError> + Send + Sync>;

/// What the registry knows about a puzzle without parsing anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactoryInfo {
    pub year: u16,
    pub day: u8,
    pub parts: u8,
}

struct Entry {
    factory: SolverFactory,
    parts: u8,
}

/// Collects factories, then freezes into a [`SolverRegistry`]
///
/// ```
/// use aoc_solver::{AocParser, ParseError, RegistryBuilder, SolveError, Solver};
///
/// struct LineCount;
///
/// impl AocParser for LineCount {
///     type SharedData<'a> = &'a str;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         Ok(input)
///     }
/// }
///
/// impl Solver for LineCount {
///     const PARTS: u8 = 1;
///
///     fn solve_part(shared: &mut Self::SharedData<'_>, _part: u8) -> Result<String, SolveError> {
///         Ok(shared.lines().count().to_string())
///     }
/// }
///
/// let registry = RegistryBuilder::new()
///     .register_solver::<LineCount>(2021, 1)
///     .unwrap()
///     .build();
///
/// let mut solver = registry.create_solver(2021, 1, "a\nb\nc").unwrap();
/// assert_eq!(solver.solve(1).unwrap().answer, "3");
/// ```
pub struct RegistryBuilder {
    table: Vec<Option<Entry>>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self {
            table: std::iter::repeat_with(|| None).take(Slot::COUNT).collect(),
        }
    }

    /// Add a factory for year/day that advertises `parts` parts
    ///
    /// # Errors
    ///
    /// * [`RegistrationError::InvalidYearDay`] outside the covered range
    /// * [`RegistrationError::DuplicateSolver`] if the slot is taken
    pub fn register<F>(
        mut self,
        year: u16,
        day: u8,
        parts: u8,
        factory: F,
    ) -> Result<Self, RegistrationError>
    where
        F: for<'a> Fn(&'a str) -> Result<Box<dyn DynSolver + 'a>, ParseError>
            + Send
            + Sync
            + 'static,
    {
        let slot = Slot::new(year, day).ok_or(RegistrationError::InvalidYearDay(year, day))?;
        let cell = &mut self.table[slot.index()];
        if cell.is_some() {
            return Err(RegistrationError::DuplicateSolver(year, day));
        }
        *cell = Some(Entry {
            factory: Box::new(factory),
            parts,
        });
        Ok(self)
    }

    /// Add a [`Solver`] type, wrapping it in a [`SolverInstance`]
    pub fn register_solver<S>(self, year: u16, day: u8) -> Result<Self, RegistrationError>
    where
        S: Solver + 'static,
    {
        self.register(year, day, S::PARTS, move |input: &str| {
            Ok(Box::new(SolverInstance::<S>::new(year, day, input)?))
        })
    }

    pub fn register_all_plugins(self) -> Result<Self, RegistrationError> {
        self.register_solver_plugins(|_| true)
    }

    /// Add every collected [`SolverPlugin`] that `filter` accepts
    ///
    /// ```no_run
    /// # use aoc_solver::RegistryBuilder;
    /// let registry = RegistryBuilder::new()
    ///     .register_solver_plugins(|plugin| plugin.year == 2021 && plugin.tags.contains(&"grid"))
    ///     .unwrap()
    ///     .build();
    /// ```
    pub fn register_solver_plugins<F>(self, filter: F) -> Result<Self, RegistrationError>
    where
        F: Fn(&SolverPlugin) -> bool,
    {
        inventory::iter::<SolverPlugin>()
            .filter(|plugin| filter(plugin))
            .try_fold(self, |builder, plugin| {
                plugin.solver.register_with(builder, plugin.year, plugin.day)
            })
    }

    pub fn build(self) -> SolverRegistry {
        SolverRegistry {
            storage: SolverFactoryStorage { table: self.table },
        }
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only view of the registered factories
pub struct SolverFactoryStorage {
    table: Vec<Option<Entry>>,
}

impl SolverFactoryStorage {
    fn entry(&self, year: u16, day: u8) -> Option<&Entry> {
        self.table.get(Slot::new(year, day)?.index())?.as_ref()
    }

    /// Registered puzzles in (year, day) order
    pub fn iter_info(&self) -> impl Iterator<Item = FactoryInfo> + '_ {
        self.table.iter().enumerate().filter_map(|(index, entry)| {
            let (year, day) = Slot(index).year_day();
            entry.as_ref().map(|e| FactoryInfo {
                year,
                day,
                parts: e.parts,
            })
        })
    }

    pub fn get_info(&self, year: u16, day: u8) -> Option<FactoryInfo> {
        self.entry(year, day).map(|e| FactoryInfo {
            year,
            day,
            parts: e.parts,
        })
    }

    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.entry(year, day).is_some()
    }

    pub fn len(&self) -> usize {
        self.table.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Immutable year/day to factory map
pub struct SolverRegistry {
    storage: SolverFactoryStorage,
}

impl SolverRegistry {
    pub fn storage(&self) -> &SolverFactoryStorage {
        &self.storage
    }

    /// Parse `input` with the solver for year/day
    ///
    /// # Errors
    ///
    /// * [`SolverError::InvalidYearDay`] outside the covered range
    /// * [`SolverError::NotFound`] if nothing is registered there
    /// * [`SolverError::ParseError`] if the solver rejects the input
    pub fn create_solver<'a>(
        &self,
        year: u16,
        day: u8,
        input: &'a str,
    ) -> Result<Box<dyn DynSolver + 'a>, SolverError> {
        if Slot::new(year, day).is_none() {
            return Err(SolverError::InvalidYearDay(year, day));
        }
        let entry = self
            .storage
            .entry(year, day)
            .ok_or(SolverError::NotFound(year, day))?;
        (entry.factory)(input).map_err(SolverError::ParseError)
    }
}

/// Object-safe registration hook so plugins can hold `&'static dyn`
/// references to unit structs
pub trait RegisterableSolver: Sync {
    fn register_with(
        &self,
        builder: RegistryBuilder,
        year: u16,
        day: u8,
    ) -> Result<RegistryBuilder, RegistrationError>;

    fn parts(&self) -> u8;
}

impl<S> RegisterableSolver for S
where
    S: Solver + Sync + 'static,
{
    fn register_with(
        &self,
        builder: RegistryBuilder,
        year: u16,
        day: u8,
    ) -> Result<RegistryBuilder, RegistrationError> {
        builder.register_solver::<S>(year, day)
    }

    fn parts(&self) -> u8 {
        S::PARTS
    }
}

/// A solver announced through `inventory`, normally by
/// `#[derive(AutoRegisterSolver)]`
pub struct SolverPlugin {
    pub year: u16,
    pub day: u8,
    pub solver: &'static dyn RegisterableSolver,
    /// Free-form labels used to select subsets, e.g. `"2021"` or `"grid"`
    pub tags: &'static [&'static str],
}

inventory::collect!(SolverPlugin);

/// Register a solver type on a builder binding, panicking on conflicts
///
/// ```
/// use aoc_solver::{register_solver, AocParser, ParseError, RegistryBuilder, SolveError, Solver};
///
/// struct Noop;
///
/// impl AocParser for Noop {
///     type SharedData<'a> = ();
///
///     fn parse(_: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         Ok(())
///     }
/// }
///
/// impl Solver for Noop {
///     const PARTS: u8 = 1;
///
///     fn solve_part(_: &mut Self::SharedData<'_>, _: u8) -> Result<String, SolveError> {
///         Ok(String::new())
///     }
/// }
///
/// let mut builder = RegistryBuilder::new();
/// register_solver!(builder, Noop, 2021, 1);
/// assert!(builder.build().storage().contains(2021, 1));
/// ```
#[macro_export]
macro_rules! register_solver {
    ($builder:expr, $solver:ty, $year:expr, $day:expr) => {
        $builder = $builder
            .register_solver::<$solver>($year, $day)
            .expect("Failed to register solver");
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_slot_bounds() {
        assert_eq!(Slot::new(2015, 1).map(Slot::index), Some(0));
        assert_eq!(Slot::new(2034, 25).map(Slot::index), Some(Slot::COUNT - 1));
        assert_eq!(Slot::new(2014, 1), None);
        assert_eq!(Slot::new(2035, 1), None);
        assert_eq!(Slot::new(2021, 0), None);
        assert_eq!(Slot::new(2021, 26), None);
    }

    #[test]
    fn test_empty_registry() {
        let registry = RegistryBuilder::new().build();
        assert!(registry.storage().is_empty());
        assert_eq!(registry.storage().len(), 0);
        assert!(matches!(
            registry.create_solver(2021, 1, ""),
            Err(SolverError::NotFound(2021, 1))
        ));
        assert!(matches!(
            registry.create_solver(1999, 1, ""),
            Err(SolverError::InvalidYearDay(1999, 1))
        ));
    }

    proptest! {
        #[test]
        fn prop_slot_round_trips(year in FIRST_YEAR..FIRST_YEAR + YEARS as u16, day in 1u8..=25) {
            let slot = Slot::new(year, day).unwrap();
            prop_assert!(slot.index() < Slot::COUNT);
            prop_assert_eq!(slot.year_day(), (year, day));
        }

        #[test]
        fn prop_slots_follow_puzzle_order(
            a in (FIRST_YEAR..FIRST_YEAR + YEARS as u16, 1u8..=25),
            b in (FIRST_YEAR..FIRST_YEAR + YEARS as u16, 1u8..=25),
        ) {
            let (sa, sb) = (Slot::new(a.0, a.1).unwrap(), Slot::new(b.0, b.1).unwrap());
            prop_assert_eq!(sa.cmp(&sb), a.cmp(&b));
        }
    }
}
