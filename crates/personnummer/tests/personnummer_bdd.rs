//! Behavioural tests for the personnummer crate.
//!
//! These scenarios cover validation outcomes, reproducible valid generation,
//! age-bounded birthdays, and the bounded invalid-candidate loop.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use chrono::{Datelike, NaiveDate};
use personnummer::{
    AgeRangeBirthdays, GenerationError, IdNumberGenerator, IdentityNumber, IdentityRequest,
    KNOWN_VALID_SEED, MAX_INVALID_ATTEMPTS, PersonIdentity, RandomSource, SerialParityGender,
    SwedenIdNumber, ValidationError, generate_invalid, is_valid, validate,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};

// ============================================================================
// Test fixtures and constants
// ============================================================================

/// Reference date ages are measured against.
fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid reference date")
}

/// Random source that fills every pattern with the known valid number.
struct ValidOnlySource;

impl RandomSource for ValidOnlySource {
    fn uniform_int(&mut self, low: i64, _high: i64) -> i64 {
        low
    }

    fn pick_one<'a>(&mut self, options: &[&'a str]) -> Option<&'a str> {
        options.first().copied()
    }

    fn fill_pattern(&mut self, _pattern: &str) -> String {
        KNOWN_VALID_SEED.to_owned()
    }
}

/// Test world holding candidates, requests, and generated output.
#[derive(Default, ScenarioState)]
struct World {
    candidate: Slot<String>,
    validation: Slot<Result<IdentityNumber, ValidationError>>,
    seed: Slot<u64>,
    request: Slot<IdentityRequest>,
    valid_only: Slot<bool>,
    generated: Slot<Vec<PersonIdentity>>,
    second_generation: Slot<Vec<PersonIdentity>>,
    invalid_candidates: Slot<Vec<String>>,
    invalid_result: Slot<Result<String, GenerationError>>,
}

impl World {
    fn validation(&self) -> Result<IdentityNumber, ValidationError> {
        self.validation.get().expect("candidate should be validated")
    }

    fn rng(&self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.seed.get().expect("seed should be set"))
    }

    fn request(&self) -> IdentityRequest {
        self.request.get().unwrap_or_default()
    }

    fn generated(&self) -> Vec<PersonIdentity> {
        self.generated.get().expect("identities should be generated")
    }
}

#[fixture]
fn world() -> World {
    World::default()
}

fn scheme() -> SwedenIdNumber {
    SwedenIdNumber::new(AgeRangeBirthdays::new(reference_date()), SerialParityGender)
}

fn generate_batch(world: &World, count: usize) -> Vec<PersonIdentity> {
    let scheme = scheme();
    let request = world.request();
    let mut rng = world.rng();
    (0..count)
        .map(|_| {
            scheme
                .generate_valid(&mut rng, &request)
                .expect("generation succeeds")
        })
        .collect()
}

fn age_on(birthday: NaiveDate, today: NaiveDate) -> i32 {
    let had_birthday = (today.month(), today.day()) >= (birthday.month(), birthday.day());
    today.year() - birthday.year() - i32::from(!had_birthday)
}

// ============================================================================
// Given steps
// ============================================================================

#[given("the identity number {candidate}")]
fn the_identity_number(world: &World, candidate: String) {
    world.candidate.set(candidate);
}

#[given("a random source seeded with {seed:u64}")]
fn a_random_source_seeded_with(world: &World, seed: u64) {
    world.seed.set(seed);
}

#[given("a random source that only produces valid numbers")]
fn a_random_source_that_only_produces_valid_numbers(world: &World) {
    world.valid_only.set(true);
}

#[given("an age range from {min_age:u32} to {max_age:u32}")]
fn an_age_range_from_to(world: &World, min_age: u32, max_age: u32) {
    world.request.set(IdentityRequest {
        min_age,
        max_age,
        gender: None,
    });
}

// ============================================================================
// When steps
// ============================================================================

#[when("the candidate is validated")]
fn the_candidate_is_validated(world: &World) {
    let candidate = world.candidate.get().expect("candidate should be set");
    world.validation.set(validate(&candidate));
}

#[when("two batches of {count:usize} valid identities are generated")]
fn two_batches_are_generated(world: &World, count: usize) {
    world.generated.set(generate_batch(world, count));
    world.second_generation.set(generate_batch(world, count));
}

#[when("{count:usize} valid identities are generated")]
fn valid_identities_are_generated(world: &World, count: usize) {
    world.generated.set(generate_batch(world, count));
}

#[when("{count:usize} invalid candidates are generated")]
fn invalid_candidates_are_generated(world: &World, count: usize) {
    let mut rng = world.rng();
    let candidates = (0..count)
        .map(|_| generate_invalid(&mut rng).expect("generation succeeds"))
        .collect();
    world.invalid_candidates.set(candidates);
}

#[when("an invalid candidate is requested")]
fn an_invalid_candidate_is_requested(world: &World) {
    assert_eq!(world.valid_only.get(), Some(true), "source should be stuck");
    let mut source = ValidOnlySource;
    world
        .invalid_result
        .set(scheme().generate_invalid(&mut source));
}

// ============================================================================
// Then steps
// ============================================================================

#[then("validation succeeds with serial {serial:u16}")]
fn validation_succeeds_with_serial(world: &World, serial: u16) {
    let number = world.validation().expect("candidate should be valid");
    assert_eq!(number.serial(), serial);
}

#[then("validation fails with a check digit mismatch")]
fn validation_fails_with_a_check_digit_mismatch(world: &World) {
    match world.validation() {
        Err(ValidationError::ChecksumMismatch { .. }) => {}
        other => panic!("Expected ChecksumMismatch, got: {other:?}"),
    }
}

#[then("validation fails with a date error")]
fn validation_fails_with_a_date_error(world: &World) {
    match world.validation() {
        Err(ValidationError::Date(_)) => {}
        other => panic!("Expected a date error, got: {other:?}"),
    }
}

#[then("both generations are identical")]
fn both_generations_are_identical(world: &World) {
    let second = world
        .second_generation
        .get()
        .expect("second generation should be set");
    assert_eq!(world.generated(), second, "Generations should be deterministic");
}

#[then("every generated identity number is valid")]
fn every_generated_identity_number_is_valid(world: &World) {
    for person in world.generated() {
        assert!(
            is_valid(person.identity_number()),
            "Invalid identity number: {}",
            person.identity_number()
        );
    }
}

#[then("every birth date lies within the age range")]
fn every_birth_date_lies_within_the_age_range(world: &World) {
    let request = world.request();
    let range = i64::from(request.min_age)..=i64::from(request.max_age);
    for person in world.generated() {
        let age = age_on(person.birth_date(), reference_date());
        assert!(
            range.contains(&i64::from(age)),
            "age {age} of {} outside {range:?}",
            person.identity_number()
        );
    }
}

#[then("no invalid candidate passes validation")]
fn no_invalid_candidate_passes_validation(world: &World) {
    let candidates = world
        .invalid_candidates
        .get()
        .expect("candidates should be generated");
    assert!(!candidates.is_empty());
    for candidate in candidates {
        assert!(!is_valid(&candidate), "{candidate} should be invalid");
    }
}

#[then("generation fails after the retry budget")]
fn generation_fails_after_the_retry_budget(world: &World) {
    let result = world.invalid_result.get().expect("result should be set");
    assert_eq!(
        result,
        Err(GenerationError::InvalidCandidateExhausted {
            max_attempts: MAX_INVALID_ATTEMPTS
        })
    );
}

// ============================================================================
// Scenario bindings
// ============================================================================

#[scenario(
    path = "tests/features/personnummer.feature",
    name = "A published example number validates"
)]
fn a_published_example_number_validates(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/personnummer.feature",
    name = "A number with the wrong check digit is rejected"
)]
fn a_number_with_the_wrong_check_digit_is_rejected(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/personnummer.feature",
    name = "A number with an impossible date is rejected"
)]
fn a_number_with_an_impossible_date_is_rejected(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/personnummer.feature",
    name = "Seeded valid generation is reproducible"
)]
fn seeded_valid_generation_is_reproducible(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/personnummer.feature",
    name = "Generated birth dates respect the age range"
)]
fn generated_birth_dates_respect_the_age_range(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/personnummer.feature",
    name = "Invalid generation never yields a valid number"
)]
fn invalid_generation_never_yields_a_valid_number(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/personnummer.feature",
    name = "Invalid generation gives up when every sample is valid"
)]
fn invalid_generation_gives_up_when_every_sample_is_valid(world: World) {
    let _ = world;
}
