//! The population growth loop and the relationship-addition operations.

use kindred_core::{
  Error,
  person::{Gender, NewPerson, Person, Relationship},
  store::PersonStore,
};
use rand::{Rng, SeedableRng, seq::SliceRandom};
use rand_chacha::ChaCha8Rng;

use crate::names::{NameSource, RandomNames};

// ─── Configuration ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
  /// Random picks tried per step before giving up with
  /// [`Error::NoEligiblePerson`].
  pub max_selection_attempts: u32,
}

impl Default for GeneratorConfig {
  fn default() -> Self { Self { max_selection_attempts: 100 } }
}

/// Outcome of a [`Generator::generate`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GenerationReport {
  /// Persons inserted by this run, the root included.
  pub created: u64,
  /// Relationship additions performed.
  pub steps:   u64,
  /// Population size when the run finished.
  pub total:   u64,
}

// ─── Generator ───────────────────────────────────────────────────────────────

/// Grows a family tree inside a [`PersonStore`].
///
/// The generator is the only writer while it runs; every step inserts at
/// least one person, so `generate(n)` finishes in at most `n` steps.
pub struct Generator<S, N, R> {
  store:  S,
  names:  N,
  rng:    R,
  config: GeneratorConfig,
}

impl<S: PersonStore> Generator<S, RandomNames<ChaCha8Rng>, ChaCha8Rng> {
  /// A generator drawing names and choices from ChaCha8 streams, seeded
  /// from `seed` or from OS entropy.
  pub fn seeded(store: S, seed: Option<u64>) -> Self {
    let mut rng = match seed {
      Some(seed) => ChaCha8Rng::seed_from_u64(seed),
      None => ChaCha8Rng::from_entropy(),
    };
    let names = RandomNames::new(ChaCha8Rng::seed_from_u64(rng.r#gen()));
    Self::new(store, names, rng)
  }
}

impl<S, N, R> Generator<S, N, R>
where
  S: PersonStore,
  N: NameSource,
  R: Rng,
{
  pub fn new(store: S, names: N, rng: R) -> Self {
    Self { store, names, rng, config: GeneratorConfig::default() }
  }

  pub fn with_config(mut self, config: GeneratorConfig) -> Self {
    self.config = config;
    self
  }

  pub fn store(&self) -> &S { &self.store }

  /// Grow the population until it holds at least `target` persons.
  ///
  /// Does nothing when the store is already large enough.
  pub async fn generate(&mut self, target: u64) -> Result<GenerationReport, S::Error> {
    let initial = self.store.count().await?;
    if initial >= target {
      tracing::debug!(target_size = target, total = initial, "population already at target");
      return Ok(GenerationReport { created: 0, steps: 0, total: initial });
    }

    tracing::info!(target_size = target, existing = initial, "growing population");

    let mut total = initial;
    if total == 0 {
      let root = self.create_root().await?;
      tracing::debug!(id = root.id, "created root person");
      total = 1;
    }

    let mut steps = 0;
    while total < target {
      let (person, relationship) = self.pick_eligible(total).await?;
      tracing::debug!(id = person.id, ?relationship, "adding relationship");
      self.apply(person, relationship).await?;
      steps += 1;
      total = self.store.count().await?;
    }

    let report = GenerationReport { created: total - initial, steps, total };
    tracing::info!(created = report.created, steps, total, "population generated");
    Ok(report)
  }

  /// Create the depth-0 person everybody else descends from or marries into.
  pub async fn create_root(&mut self) -> Result<Person, S::Error> {
    let gender = self.random_gender();
    let root = NewPerson::new(
      self.names.first_name(gender),
      self.names.last_name(),
      gender,
      0,
    );
    self.store.create(root).await
  }

  /// Pick a random person that can still gain a relationship, and the
  /// relationship to give them.
  async fn pick_eligible(&mut self, population: u64) -> Result<(Person, Relationship), S::Error> {
    if population == 0 {
      return Err(Error::EmptyStore.into());
    }

    let attempts = self.config.max_selection_attempts;
    for _ in 0..attempts {
      let index = self.rng.gen_range(0..population);
      let Some(person) = self.store.nth(index).await? else {
        continue;
      };
      if let Some(&relationship) = person.eligible_relationships().choose(&mut self.rng) {
        return Ok((person, relationship));
      }
    }

    Err(Error::NoEligiblePerson { attempts }.into())
  }

  async fn apply(&mut self, person: Person, relationship: Relationship) -> Result<(), S::Error> {
    match relationship {
      Relationship::Parents => {
        self.add_parents(&person).await?;
      }
      Relationship::Spouse => {
        self.add_spouse(person).await?;
      }
      Relationship::Child => {
        self.add_child(&person).await?;
      }
    }
    Ok(())
  }

  // ── Relationship additions ───────────────────────────────────────────────

  /// Give `person` a freshly created, married father and mother one
  /// generation up, both carrying `person`'s surname.
  ///
  /// Returns `(person, father, mother)` as persisted.
  pub async fn add_parents(&mut self, person: &Person) -> Result<(Person, Person, Person), S::Error> {
    if !person.can_have_new_parents() {
      return Err(Error::AlreadyHasParents(person.id).into());
    }

    let depth = person.depth - 1;
    let father = NewPerson::new(
      self.names.first_name(Gender::Male),
      person.last_name.clone(),
      Gender::Male,
      depth,
    );
    let mother = NewPerson::new(
      self.names.first_name(Gender::Female),
      person.last_name.clone(),
      Gender::Female,
      depth,
    )
    .with_maiden_name(self.names.last_name());

    self.store.link_parents(person.id, father, mother).await
  }

  /// Marry `person` to a new person of the opposite gender at the same depth.
  ///
  /// The wife always carries the husband's surname: a new wife takes it and
  /// keeps a generated maiden name, a woman marrying keeps her own surname as
  /// maiden name. Returns `(person, spouse)` as persisted.
  pub async fn add_spouse(&mut self, mut person: Person) -> Result<(Person, Person), S::Error> {
    if !person.can_have_new_spouse() {
      return Err(Error::AlreadyMarried(person.id).into());
    }

    let gender = person.gender.opposite();
    let first_name = self.names.first_name(gender);
    let spouse = match person.gender {
      Gender::Male => NewPerson::new(first_name, person.last_name.clone(), gender, person.depth)
        .with_maiden_name(self.names.last_name()),
      Gender::Female => {
        let surname = self.names.last_name();
        let spouse = NewPerson::new(first_name, surname.clone(), gender, person.depth);
        person.maiden_name = Some(std::mem::replace(&mut person.last_name, surname));
        spouse
      }
    };

    self.store.link_spouse(person, spouse).await
  }

  /// Add a child of `person` and their spouse one generation down, carrying
  /// the father's surname.
  pub async fn add_child(&mut self, person: &Person) -> Result<Person, S::Error> {
    let spouse_id = person.spouse_id.ok_or(Error::MissingSpouse(person.id))?;
    let spouse = self
      .store
      .get(spouse_id)
      .await?
      .ok_or(Error::PersonNotFound(spouse_id))?;

    let (father, mother) = if person.is_male() { (person, &spouse) } else { (&spouse, person) };
    let gender = self.random_gender();
    let child = NewPerson::new(
      self.names.first_name(gender),
      father.last_name.clone(),
      gender,
      person.depth + 1,
    )
    .with_parents(father.id, mother.id);

    self.store.create(child).await
  }

  fn random_gender(&mut self) -> Gender {
    if self.rng.gen_bool(0.5) { Gender::Male } else { Gender::Female }
  }
}
