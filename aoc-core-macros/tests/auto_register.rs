use aoc_core::{
    AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError,
    SolverRegistryBuilder,
};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2019, day = 1, tags = ["fuel", "easy"])]
struct Fuel;

impl AocParser for Fuel {
    type SharedData<'a> = Vec<u32>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        input
            .split_whitespace()
            .map(|t| t.parse().map_err(|_| ParseError::InvalidFormat(t.to_string())))
            .collect()
    }
}

impl PartSolver<1> for Fuel {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().map(|m| m / 3 - 2).sum::<u32>().to_string())
    }
}

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2019, day = 2)]
struct Untagged;

impl AocParser for Untagged {
    type SharedData<'a> = &'a str;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(input)
    }
}

impl PartSolver<1> for Untagged {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.len().to_string())
    }
}

impl PartSolver<2> for Untagged {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.to_uppercase())
    }
}

#[test]
fn plugins_are_discovered() {
    let registry = SolverRegistryBuilder::new()
        .register_all_plugins()
        .unwrap()
        .build();

    let mut fuel = registry.create_solver(2019, 1, "12 14 1969").unwrap();
    assert_eq!(fuel.parts(), 1);
    assert_eq!(fuel.solve(1).unwrap().answer, "658");

    let mut untagged = registry.create_solver(2019, 2, "abc").unwrap();
    assert_eq!(untagged.solve(2).unwrap().answer, "ABC");
}

#[test]
fn plugins_can_be_filtered_by_tag() {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.tags.contains(&"fuel"))
        .unwrap()
        .build();

    assert!(registry.contains(2019, 1));
    assert!(!registry.contains(2019, 2));
    assert_eq!(registry.len(), 1);
}

#[test]
fn registering_plugins_twice_is_a_duplicate() {
    let builder = SolverRegistryBuilder::new().register_all_plugins().unwrap();
    assert!(builder.register_all_plugins().is_err());
}
