//! Name sources for generated persons.

use kindred_core::person::Gender;
use rand::{Rng, seq::SliceRandom};

const MALE_FIRST_NAMES: &[&str] = &[
  "Aaron", "Albert", "Alfred", "Arthur", "Benjamin", "Bernard", "Charles",
  "Clarence", "Daniel", "David", "Edward", "Elias", "Ernest", "Frank",
  "Frederick", "George", "Harold", "Henry", "Herbert", "Howard", "Isaac",
  "Jacob", "James", "John", "Joseph", "Leonard", "Louis", "Martin", "Michael",
  "Nathan", "Oscar", "Patrick", "Paul", "Peter", "Ralph", "Raymond", "Robert",
  "Samuel", "Thomas", "Walter", "William",
];

const FEMALE_FIRST_NAMES: &[&str] = &[
  "Ada", "Agnes", "Alice", "Anna", "Beatrice", "Bertha", "Clara", "Dorothy",
  "Edith", "Eleanor", "Elizabeth", "Emma", "Esther", "Florence", "Frances",
  "Grace", "Hannah", "Harriet", "Helen", "Ida", "Irene", "Josephine", "Julia",
  "Laura", "Lillian", "Louise", "Lucy", "Margaret", "Martha", "Mary", "Mildred",
  "Nora", "Olive", "Pearl", "Rose", "Ruth", "Sarah", "Sophia", "Vera", "Violet",
];

const LAST_NAMES: &[&str] = &[
  "Abbott", "Baker", "Barnes", "Bennett", "Brooks", "Carter", "Clarke",
  "Collins", "Cooper", "Davies", "Dawson", "Edwards", "Ellis", "Evans",
  "Fisher", "Fletcher", "Foster", "Graham", "Hall", "Harris", "Hughes",
  "Jenkins", "Kelly", "Lawson", "Marsh", "Mitchell", "Morgan", "Murphy",
  "Parker", "Porter", "Reed", "Russell", "Shaw", "Spencer", "Stone", "Turner",
  "Walker", "Warren", "Webb", "Wright",
];

/// Supplies names for newly generated persons.
pub trait NameSource {
  fn first_name(&mut self, gender: Gender) -> String;

  fn last_name(&mut self) -> String;
}

/// Draws names uniformly from built-in lists.
pub struct RandomNames<R> {
  rng: R,
}

impl<R: Rng> RandomNames<R> {
  pub fn new(rng: R) -> Self { Self { rng } }
}

impl<R: Rng> NameSource for RandomNames<R> {
  fn first_name(&mut self, gender: Gender) -> String {
    let pool = match gender {
      Gender::Male => MALE_FIRST_NAMES,
      Gender::Female => FEMALE_FIRST_NAMES,
    };
    pick(pool, &mut self.rng)
  }

  fn last_name(&mut self) -> String { pick(LAST_NAMES, &mut self.rng) }
}

fn pick(pool: &[&str], rng: &mut impl Rng) -> String {
  // Pools are non-empty constants.
  pool.choose(rng).copied().unwrap_or("Doe").to_owned()
}

#[cfg(test)]
mod tests {
  use rand::SeedableRng;
  use rand_chacha::ChaCha8Rng;

  use super::*;

  #[test]
  fn first_names_follow_gender() {
    let mut names = RandomNames::new(ChaCha8Rng::seed_from_u64(42));
    for _ in 0..50 {
      assert!(MALE_FIRST_NAMES.contains(&names.first_name(Gender::Male).as_str()));
      assert!(FEMALE_FIRST_NAMES.contains(&names.first_name(Gender::Female).as_str()));
    }
  }

  #[test]
  fn same_seed_same_names() {
    let mut a = RandomNames::new(ChaCha8Rng::seed_from_u64(7));
    let mut b = RandomNames::new(ChaCha8Rng::seed_from_u64(7));
    for _ in 0..20 {
      assert_eq!(a.last_name(), b.last_name());
      assert_eq!(a.first_name(Gender::Female), b.first_name(Gender::Female));
    }
  }

  #[test]
  fn name_pools_are_not_blank() {
    for name in MALE_FIRST_NAMES.iter().chain(FEMALE_FIRST_NAMES).chain(LAST_NAMES) {
      assert!(!name.trim().is_empty());
    }
  }
}
