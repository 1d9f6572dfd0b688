use aoc_solver::{
    AocParser, ParseError, RegistrationError, RegistryBuilder, SolveError, Solver, SolverError,
};

struct Lines;

impl AocParser for Lines {
    type SharedData<'a> = Vec<&'a str>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        if input.is_empty() {
            return Err(ParseError::MissingData("empty input".to_string()));
        }
        Ok(input.lines().collect())
    }
}

impl Solver for Lines {
    const PARTS: u8 = 2;

    fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
        match part {
            1 => Ok(shared.len().to_string()),
            2 => Ok(shared.iter().map(|l| l.len()).sum::<usize>().to_string()),
            _ => Err(SolveError::PartNotImplemented(part)),
        }
    }
}

#[test]
fn test_duplicate_registration_is_rejected() {
    let result = RegistryBuilder::new()
        .register_solver::<Lines>(2021, 3)
        .unwrap()
        .register_solver::<Lines>(2021, 3);
    assert!(matches!(result, Err(RegistrationError::DuplicateSolver(2021, 3))));
}

#[test]
fn test_out_of_bounds_registration_is_rejected() {
    assert!(matches!(
        RegistryBuilder::new().register_solver::<Lines>(2021, 26),
        Err(RegistrationError::InvalidYearDay(2021, 26))
    ));
    assert!(matches!(
        RegistryBuilder::new().register_solver::<Lines>(2014, 1),
        Err(RegistrationError::InvalidYearDay(2014, 1))
    ));
}

#[test]
fn test_iter_info_is_ordered_by_year_then_day() {
    let registry = RegistryBuilder::new()
        .register_solver::<Lines>(2022, 1)
        .unwrap()
        .register_solver::<Lines>(2021, 14)
        .unwrap()
        .register_solver::<Lines>(2021, 2)
        .unwrap()
        .build();

    let keys: Vec<_> = registry
        .storage()
        .iter_info()
        .map(|info| (info.year, info.day, info.parts))
        .collect();
    assert_eq!(keys, vec![(2021, 2, 2), (2021, 14, 2), (2022, 1, 2)]);
    assert_eq!(registry.storage().len(), 3);
}

#[test]
fn test_parse_failure_surfaces_as_solver_error() {
    let registry = RegistryBuilder::new()
        .register_solver::<Lines>(2021, 1)
        .unwrap()
        .build();

    match registry.create_solver(2021, 1, "") {
        Err(SolverError::ParseError(ParseError::MissingData(_))) => {}
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("empty input should not parse"),
    }
}

#[test]
fn test_instance_reports_identity_and_timing() {
    let registry = RegistryBuilder::new()
        .register_solver::<Lines>(2021, 7)
        .unwrap()
        .build();

    let mut solver = registry.create_solver(2021, 7, "ab\ncde").unwrap();
    assert_eq!((solver.year(), solver.day(), solver.parts()), (2021, 7, 2));
    assert!(solver.parse_end() >= solver.parse_start());

    let result = solver.solve(2).unwrap();
    assert_eq!(result.answer, "5");
    assert!(result.duration().num_microseconds().unwrap_or(0) >= 0);
    assert!(matches!(solver.solve(3), Err(SolveError::PartOutOfRange(3))));
}

#[test]
fn test_custom_factory_registration() {
    let registry = RegistryBuilder::new()
        .register(2021, 9, 1, |input: &str| {
            Ok(Box::new(aoc_solver::SolverInstance::<Lines>::new(2021, 9, input)?))
        })
        .unwrap()
        .build();

    let info = registry.storage().get_info(2021, 9).unwrap();
    assert_eq!(info.parts, 1);
    let mut solver = registry.create_solver(2021, 9, "x").unwrap();
    assert_eq!(solver.solve(1).unwrap().answer, "1");
}
