//! Store scenarios shared by the in-memory and PostgreSQL test suites.
//!
//! Each scenario takes `&dyn CatalogStore` so both backends are held to the
//! same behaviour.

#![allow(dead_code)]

use assert_matches::assert_matches;
use cinema_db::models::director::{CreateDirector, Director, UpdateDirector};
use cinema_db::models::movie::{CreateMovie, Movie, UpdateMovie};
use cinema_db::models::review::{CreateReview, Review, UpdateReview};
use cinema_db::models::user::{CreateUser, UQ_CONFIRMATION_CODE, UQ_EMAIL, UQ_USERNAME};
use cinema_db::store::Repository;
use cinema_db::{CatalogStore, StoreError};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub async fn director(store: &dyn CatalogStore, name: &str) -> Director {
    let input = CreateDirector {
        name: name.to_string(),
    };
    Repository::<Director>::create(store, &input).await.unwrap()
}

pub async fn movie(store: &dyn CatalogStore, director_id: i64, title: &str) -> Movie {
    let input = CreateMovie {
        title: title.to_string(),
        description: format!("About {title}"),
        duration: 120,
        director_id,
    };
    Repository::<Movie>::create(store, &input).await.unwrap()
}

pub async fn review(store: &dyn CatalogStore, movie_id: i64, stars: i16) -> Review {
    let input = CreateReview {
        text: format!("{stars} stars"),
        stars,
        movie_id,
    };
    Repository::<Review>::create(store, &input).await.unwrap()
}

pub fn new_user(username: &str, code: &str) -> CreateUser {
    CreateUser {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
        confirmation_code: code.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

pub async fn director_round_trip(store: &dyn CatalogStore) {
    let created = director(store, "Nolan").await;
    let fetched = Repository::<Director>::find_by_id(store, created.id)
        .await
        .unwrap()
        .expect("director should exist");
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.name, "Nolan");
}

pub async fn missing_rows_report_absence(store: &dyn CatalogStore) {
    assert!(Repository::<Director>::find_by_id(store, 999_999)
        .await
        .unwrap()
        .is_none());
    let update = UpdateMovie {
        title: Some("Ghost".into()),
        ..Default::default()
    };
    assert!(Repository::<Movie>::update(store, 999_999, &update)
        .await
        .unwrap()
        .is_none());
    assert!(!Repository::<Review>::delete(store, 999_999).await.unwrap());
}

pub async fn partial_update_keeps_other_fields(store: &dyn CatalogStore) {
    let nolan = director(store, "Nolan").await;
    let original = movie(store, nolan.id, "Memento").await;

    let update = UpdateMovie {
        duration: Some(113),
        ..Default::default()
    };
    let updated = Repository::<Movie>::update(store, original.id, &update)
        .await
        .unwrap()
        .expect("movie should exist");

    assert_eq!(updated.duration, 113);
    assert_eq!(updated.title, "Memento");
    assert_eq!(updated.description, original.description);
    assert_eq!(updated.director_id, nolan.id);

    let renamed = Repository::<Director>::update(
        store,
        nolan.id,
        &UpdateDirector {
            name: Some("Christopher Nolan".into()),
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(renamed.name, "Christopher Nolan");

    let first = review(store, original.id, 2).await;
    let edited = Repository::<Review>::update(
        store,
        first.id,
        &UpdateReview {
            stars: Some(5),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(edited.stars, 5);
    assert_eq!(edited.text, first.text);
}

pub async fn missing_parent_is_foreign_key_violation(store: &dyn CatalogStore) {
    let input = CreateMovie {
        title: "Orphan".into(),
        description: String::new(),
        duration: 90,
        director_id: 424_242,
    };
    assert_matches!(
        Repository::<Movie>::create(store, &input).await,
        Err(StoreError::ForeignKeyViolation { .. })
    );

    let input = CreateReview {
        text: "Nobody watched this".into(),
        stars: 3,
        movie_id: 424_242,
    };
    assert_matches!(
        Repository::<Review>::create(store, &input).await,
        Err(StoreError::ForeignKeyViolation { .. })
    );
}

pub async fn deleting_director_cascades(store: &dyn CatalogStore) {
    let nolan = director(store, "Nolan").await;
    let villeneuve = director(store, "Villeneuve").await;
    let memento = movie(store, nolan.id, "Memento").await;
    let tenet = movie(store, nolan.id, "Tenet").await;
    let dune = movie(store, villeneuve.id, "Dune").await;
    let r1 = review(store, memento.id, 5).await;
    let r2 = review(store, tenet.id, 3).await;
    let r3 = review(store, dune.id, 4).await;

    assert!(Repository::<Director>::delete(store, nolan.id).await.unwrap());

    for id in [memento.id, tenet.id] {
        assert!(Repository::<Movie>::find_by_id(store, id).await.unwrap().is_none());
    }
    for id in [r1.id, r2.id] {
        assert!(Repository::<Review>::find_by_id(store, id).await.unwrap().is_none());
    }

    // Other directors' rows are untouched.
    assert!(Repository::<Movie>::find_by_id(store, dune.id).await.unwrap().is_some());
    assert!(Repository::<Review>::find_by_id(store, r3.id).await.unwrap().is_some());

    // A second delete finds nothing.
    assert!(!Repository::<Director>::delete(store, nolan.id).await.unwrap());
}

pub async fn deleting_movie_cascades(store: &dyn CatalogStore) {
    let nolan = director(store, "Nolan").await;
    let memento = movie(store, nolan.id, "Memento").await;
    let r1 = review(store, memento.id, 5).await;

    assert!(Repository::<Movie>::delete(store, memento.id).await.unwrap());
    assert!(Repository::<Review>::find_by_id(store, r1.id).await.unwrap().is_none());
    assert!(Repository::<Director>::find_by_id(store, nolan.id).await.unwrap().is_some());
}

pub async fn aggregates(store: &dyn CatalogStore) {
    let nolan = director(store, "Nolan").await;
    let lonely = director(store, "Lonely").await;
    let memento = movie(store, nolan.id, "Memento").await;
    let tenet = movie(store, nolan.id, "Tenet").await;
    for stars in [5, 3, 4] {
        review(store, memento.id, stars).await;
    }

    let counts = store.list_directors_with_movie_count().await.unwrap();
    let count_of = |id| counts.iter().find(|d| d.id == id).unwrap().movies_count;
    assert_eq!(count_of(nolan.id), 2);
    assert_eq!(count_of(lonely.id), 0);

    let movies = store.list_movies_with_reviews().await.unwrap();
    let rated = movies.iter().find(|m| m.id == memento.id).unwrap();
    assert_eq!(rated.average_rating, Some(4.0));
    assert_eq!(rated.reviews.len(), 3);
    let unrated = movies.iter().find(|m| m.id == tenet.id).unwrap();
    assert_eq!(unrated.average_rating, None);
    assert!(unrated.reviews.is_empty());
}

pub async fn users_are_unique(store: &dyn CatalogStore) {
    store.create_user(&new_user("nolan", "111111")).await.unwrap();

    let same_name = new_user("nolan", "222222");
    assert_matches!(
        store.create_user(&same_name).await,
        Err(e) if e.is_unique_violation_of(UQ_USERNAME)
    );

    let mut same_email = new_user("chris", "333333");
    same_email.email = "nolan@example.com".into();
    assert_matches!(
        store.create_user(&same_email).await,
        Err(e) if e.is_unique_violation_of(UQ_EMAIL)
    );

    assert_matches!(
        store.create_user(&new_user("other", "111111")).await,
        Err(e) if e.is_unique_violation_of(UQ_CONFIRMATION_CODE)
    );
}

pub async fn confirmation_activates_once(store: &dyn CatalogStore) {
    let created = store.create_user(&new_user("nolan", "123456")).await.unwrap();
    assert!(!created.is_active);
    assert_eq!(created.confirmation_code.as_deref(), Some("123456"));

    assert!(store.confirm_user("654321").await.unwrap().is_none());
    let untouched = store.find_user_by_username("nolan").await.unwrap().unwrap();
    assert!(!untouched.is_active);

    let confirmed = store.confirm_user("123456").await.unwrap().unwrap();
    assert_eq!(confirmed.id, created.id);
    assert!(confirmed.is_active);
    assert!(confirmed.confirmation_code.is_none());

    // The code is single-use.
    assert!(store.confirm_user("123456").await.unwrap().is_none());

    let by_email = store
        .find_user_by_email("nolan@example.com")
        .await
        .unwrap()
        .unwrap();
    assert!(by_email.is_active);
}
