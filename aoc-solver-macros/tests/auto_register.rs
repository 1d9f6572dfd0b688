use aoc_solver::{
    AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, RegistryBuilder, SolveError,
};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2030, day = 24, tags = ["test", "words"])]
struct WordCount;

impl AocParser for WordCount {
    type SharedData<'a> = Vec<&'a str>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(input.split_whitespace().collect())
    }
}

impl PartSolver<1> for WordCount {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.len().to_string())
    }
}

impl PartSolver<2> for WordCount {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .iter()
            .max_by_key(|w| w.len())
            .map(|w| w.to_string())
            .ok_or_else(|| SolveError::failed("no words"))
    }
}

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2030, day = 25)]
struct Untagged;

impl AocParser for Untagged {
    type SharedData<'a> = ();

    fn parse(_input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(())
    }
}

impl PartSolver<1> for Untagged {
    fn solve(_shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok("done".to_string())
    }
}

#[test]
fn test_plugin_is_submitted_with_tags() {
    let plugin = aoc_solver::inventory::iter::<aoc_solver::SolverPlugin>()
        .find(|p| p.year == 2030 && p.day == 24)
        .expect("plugin was not submitted");
    assert_eq!(plugin.tags, &["test", "words"]);
    assert_eq!(plugin.solver.parts(), 2);
}

#[test]
fn test_registered_plugin_solves_through_registry() {
    let registry = RegistryBuilder::new()
        .register_all_plugins()
        .expect("Failed to register plugins")
        .build();

    let mut solver = registry
        .create_solver(2030, 24, "the quick brown fox")
        .expect("Failed to create solver - was it registered?");
    assert_eq!(solver.parts(), 2);
    assert_eq!(solver.solve(1).unwrap().answer, "4");
    assert_eq!(solver.solve(2).unwrap().answer, "quick");
}

#[test]
fn test_tag_filter_skips_untagged_plugins() {
    let registry = RegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.tags.contains(&"words"))
        .unwrap()
        .build();

    assert!(registry.storage().contains(2030, 24));
    assert!(!registry.storage().contains(2030, 25));
}

#[test]
fn test_untagged_plugin_has_empty_tags() {
    let registry = RegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.year == 2030 && plugin.tags.is_empty())
        .unwrap()
        .build();

    let mut solver = registry.create_solver(2030, 25, "").unwrap();
    assert_eq!(solver.solve(1).unwrap().answer, "done");
}
