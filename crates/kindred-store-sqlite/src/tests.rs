//! Integration tests for `SqliteStore` against an in-memory database.

use std::collections::HashSet;

use kindred_core::{
  person::{Gender, NewPerson, Person},
  store::PersonStore,
};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn new_person(first: &str, gender: Gender, depth: i64) -> NewPerson {
  NewPerson::new(first, "Smith", gender, depth)
}

/// A married couple with parents, one child, and two more children of the
/// parents: seven persons in total.
async fn family(s: &SqliteStore) -> (Person, Person, Person, Person) {
  let p = s.create(new_person("Paul", Gender::Male, 0)).await.unwrap();
  let (p, father, mother) = s
    .link_parents(
      p.id,
      new_person("Frank", Gender::Male, -1),
      new_person("Mary", Gender::Female, -1).with_maiden_name("Jones"),
    )
    .await
    .unwrap();
  let (p, spouse) = s
    .link_spouse(
      p,
      new_person("Sue", Gender::Female, 0).with_maiden_name("Brown"),
    )
    .await
    .unwrap();

  s.create(new_person("Kid", Gender::Female, 1).with_parents(p.id, spouse.id))
    .await
    .unwrap();
  for name in ["Bro", "Sis"] {
    s.create(new_person(name, Gender::Male, 0).with_parents(father.id, mother.id))
      .await
      .unwrap();
  }

  (p, father, mother, spouse)
}

// ─── Create ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_person() {
  let s = store().await;

  let created = s
    .create(new_person("Ada", Gender::Female, 0).with_maiden_name("Byron"))
    .await
    .unwrap();
  assert_eq!(created.first_name, "Ada");
  assert_eq!(created.maiden_name.as_deref(), Some("Byron"));
  assert_eq!(created.created_at, created.updated_at);

  let fetched = s.get(created.id).await.unwrap().unwrap();
  assert_eq!(fetched, created);
}

#[tokio::test]
async fn get_missing_returns_none() {
  let s = store().await;
  assert!(s.get(42).await.unwrap().is_none());
}

#[tokio::test]
async fn create_rejects_blank_names() {
  let s = store().await;
  let err = s.create(new_person("", Gender::Male, 0)).await.unwrap_err();
  assert!(matches!(
    err,
    Error::Core(kindred_core::Error::Validation { field: "first_name", .. })
  ));
  assert_eq!(s.count().await.unwrap(), 0);
}

#[tokio::test]
async fn create_rejects_dangling_parent_reference() {
  let s = store().await;
  let err = s
    .create(new_person("Orphan", Gender::Male, 1).with_parents(98, 99))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Database(_)));
}

// ─── Count / random / nth ────────────────────────────────────────────────────

#[tokio::test]
async fn count_tracks_inserts() {
  let s = store().await;
  assert_eq!(s.count().await.unwrap(), 0);
  s.create(new_person("A", Gender::Male, 0)).await.unwrap();
  s.create(new_person("B", Gender::Female, 0)).await.unwrap();
  assert_eq!(s.count().await.unwrap(), 2);
}

#[tokio::test]
async fn random_on_empty_store_fails() {
  let s = store().await;
  let err = s.random().await.unwrap_err();
  assert!(matches!(err, Error::Core(kindred_core::Error::EmptyStore)));
}

#[tokio::test]
async fn random_returns_an_existing_person() {
  let s = store().await;
  let mut ids = HashSet::new();
  for name in ["A", "B", "C"] {
    ids.insert(s.create(new_person(name, Gender::Male, 0)).await.unwrap().id);
  }
  for _ in 0..10 {
    assert!(ids.contains(&s.random().await.unwrap().id));
  }
}

#[tokio::test]
async fn nth_follows_id_order() {
  let s = store().await;
  let a = s.create(new_person("A", Gender::Male, 0)).await.unwrap();
  let b = s.create(new_person("B", Gender::Male, 0)).await.unwrap();

  assert_eq!(s.nth(0).await.unwrap().unwrap().id, a.id);
  assert_eq!(s.nth(1).await.unwrap().unwrap().id, b.id);
  assert!(s.nth(2).await.unwrap().is_none());
}

// ─── Linking ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn link_parents_creates_a_married_couple() {
  let s = store().await;
  let child = s.create(new_person("Paul", Gender::Male, 0)).await.unwrap();

  let (child, father, mother) = s
    .link_parents(
      child.id,
      new_person("Frank", Gender::Male, -1),
      new_person("Mary", Gender::Female, -1),
    )
    .await
    .unwrap();

  assert_eq!(child.father_id, Some(father.id));
  assert_eq!(child.mother_id, Some(mother.id));
  assert_eq!(father.spouse_id, Some(mother.id));
  assert_eq!(mother.spouse_id, Some(father.id));
  assert_eq!(s.count().await.unwrap(), 3);

  let stored = s.get(child.id).await.unwrap().unwrap();
  assert_eq!(stored, child);
}

#[tokio::test]
async fn link_parents_for_missing_child_writes_nothing() {
  let s = store().await;
  let err = s
    .link_parents(
      7,
      new_person("Frank", Gender::Male, -1),
      new_person("Mary", Gender::Female, -1),
    )
    .await
    .unwrap_err();

  assert!(matches!(err, Error::Core(kindred_core::Error::PersonNotFound(7))));
  assert_eq!(s.count().await.unwrap(), 0);
}

#[tokio::test]
async fn link_spouse_is_symmetric_and_persists_names() {
  let s = store().await;
  let mut woman = s
    .create(NewPerson::new("Ada", "Byron", Gender::Female, 0))
    .await
    .unwrap();
  woman.maiden_name = Some(woman.last_name.clone());
  woman.last_name = "King".into();

  let (woman, husband) = s
    .link_spouse(woman, NewPerson::new("William", "King", Gender::Male, 0))
    .await
    .unwrap();

  assert_eq!(woman.spouse_id, Some(husband.id));
  assert_eq!(husband.spouse_id, Some(woman.id));
  assert_eq!(woman.last_name, "King");
  assert_eq!(woman.maiden_name.as_deref(), Some("Byron"));
  assert_eq!(s.get(woman.id).await.unwrap().unwrap(), woman);
}

// ─── Derived relationships ───────────────────────────────────────────────────

#[tokio::test]
async fn children_follow_the_parent_gender() {
  let s = store().await;
  let (p, father, mother, spouse) = family(&s).await;

  let kids = s.children(&p).await.unwrap();
  assert_eq!(kids.len(), 1);
  assert_eq!(kids[0].father_id, Some(p.id));
  assert_eq!(kids[0].mother_id, Some(spouse.id));
  assert_eq!(s.children(&spouse).await.unwrap(), kids);

  // Paul and his two siblings.
  assert_eq!(s.children(&father).await.unwrap().len(), 3);
  assert_eq!(s.children(&mother).await.unwrap().len(), 3);
  assert!(s.children(&s.get(kids[0].id).await.unwrap().unwrap()).await.unwrap().is_empty());
}

#[tokio::test]
async fn siblings_share_both_parents() {
  let s = store().await;
  let (p, father, mother, _) = family(&s).await;

  let sibs = s.siblings(&p).await.unwrap();
  assert_eq!(sibs.len(), 2);
  for sib in &sibs {
    assert_ne!(sib.id, p.id);
    assert_eq!(sib.father_id, Some(father.id));
    assert_eq!(sib.mother_id, Some(mother.id));
  }
}

#[tokio::test]
async fn persons_without_parents_have_no_siblings() {
  let s = store().await;
  let a = s.create(new_person("A", Gender::Male, 0)).await.unwrap();
  s.create(new_person("B", Gender::Male, 0)).await.unwrap();
  assert!(s.siblings(&a).await.unwrap().is_empty());
}

#[tokio::test]
async fn siblings_match_on_a_shared_unknown_mother() {
  let s = store().await;
  let dad = s.create(new_person("Dad", Gender::Male, -1)).await.unwrap();
  let mut a = new_person("A", Gender::Male, 0);
  a.father_id = Some(dad.id);
  let mut b = new_person("B", Gender::Female, 0);
  b.father_id = Some(dad.id);
  let a = s.create(a).await.unwrap();
  let b = s.create(b).await.unwrap();

  let ids: Vec<_> = s.siblings(&a).await.unwrap().iter().map(|p| p.id).collect();
  assert_eq!(ids, vec![b.id]);

  let views = s.list_views().await.unwrap();
  let view_a = views.iter().find(|v| v.id == a.id).unwrap();
  assert_eq!(view_a.sibling_ids, vec![b.id]);
  assert_eq!(s.view(a).await.unwrap().sibling_ids, vec![b.id]);
}

// ─── Views ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn view_lists_children_and_siblings() {
  let s = store().await;
  let (p, father, mother, spouse) = family(&s).await;

  let view = s.view(p.clone()).await.unwrap();
  assert_eq!(view.id, p.id);
  assert_eq!(view.father_id, Some(father.id));
  assert_eq!(view.mother_id, Some(mother.id));
  assert_eq!(view.spouse_id, Some(spouse.id));
  assert_eq!(view.children_ids.len(), 1);
  assert_eq!(view.sibling_ids.len(), 2);
}

#[tokio::test]
async fn list_views_agrees_with_per_person_views() {
  let s = store().await;
  family(&s).await;

  let all = s.list_views().await.unwrap();
  assert_eq!(all.len(), 7);

  for view in &all {
    let person = s.get(view.id).await.unwrap().unwrap();
    assert_eq!(&s.view(person).await.unwrap(), view);
  }
}
