use anyhow::Result;
use chrono::{TimeZone, Utc};
use sea_orm::EntityTrait;

use super::setup_test_db;
use crate::{errors::ModelError, object_id, product};

fn sample(name: &str) -> product::NewProduct {
    product::NewProduct {
        name: name.to_string(),
        description: Some(format!("{name} description")),
        price: 100.0,
        category: "Electronics".into(),
        stock: 10,
        release_date: None,
    }
}

#[tokio::test]
async fn create_assigns_id_and_timestamps() -> Result<()> {
    let db = setup_test_db().await?;
    let release = Utc.with_ymd_and_hms(2024, 9, 20, 8, 0, 0).unwrap();
    let input = product::NewProduct { release_date: Some(release), ..sample("iPhone 15 Pro") };

    let created = product::create(&db, input.clone()).await?;

    assert!(object_id::is_valid(&created.id));
    assert_eq!(created.name, input.name);
    assert_eq!(created.description, input.description);
    assert_eq!(created.price, input.price);
    assert_eq!(created.category, input.category);
    assert_eq!(created.stock, input.stock);
    assert_eq!(created.release_date.map(|d| d.with_timezone(&Utc)), Some(release));
    assert_eq!(created.created_at, created.updated_at);

    let stored = product::find_by_id(&db, &created.id).await?;
    assert_eq!(stored.map(|p| p.name), Some("iPhone 15 Pro".to_string()));
    Ok(())
}

#[tokio::test]
async fn create_trims_text_fields() -> Result<()> {
    let db = setup_test_db().await?;
    let input = product::NewProduct {
        name: "  Kindle  ".into(),
        description: Some(" e-reader ".into()),
        category: " Books ".into(),
        ..sample("unused")
    };
    let created = product::create(&db, input).await?;
    assert_eq!(created.name, "Kindle");
    assert_eq!(created.description.as_deref(), Some("e-reader"));
    assert_eq!(created.category, "Books");
    Ok(())
}

#[tokio::test]
async fn storage_boundary_rejects_out_of_range_values() -> Result<()> {
    let db = setup_test_db().await?;

    let blank = product::NewProduct { name: "   ".into(), ..sample("x") };
    assert!(matches!(product::create(&db, blank).await, Err(ModelError::Validation(_))));

    let free = product::NewProduct { price: 0.0, ..sample("x") };
    assert!(matches!(product::create(&db, free).await, Err(ModelError::Validation(_))));

    let negative = product::NewProduct { stock: -1, ..sample("x") };
    assert!(matches!(product::create(&db, negative).await, Err(ModelError::Validation(_))));

    assert!(product::list_all(&db).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn list_all_is_newest_first() -> Result<()> {
    let db = setup_test_db().await?;
    assert!(product::list_all(&db).await?.is_empty());

    let mut ids = Vec::new();
    for i in 1..=3 {
        ids.push(product::create(&db, sample(&format!("Product {i}"))).await?.id);
    }

    let listed = product::list_all(&db).await?;
    assert_eq!(listed.len(), 3);
    ids.reverse();
    assert_eq!(listed.iter().map(|p| p.id.clone()).collect::<Vec<_>>(), ids);
    assert!(listed.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    Ok(())
}

#[tokio::test]
async fn apply_patch_touches_only_given_fields() -> Result<()> {
    let db = setup_test_db().await?;
    let original = product::create(&db, sample("Old Product")).await?;

    let patch = product::ProductPatch { name: Some("Updated Product".into()), ..Default::default() };
    let updated = product::apply_patch(&db, &original.id, patch).await?.expect("product exists");

    assert_eq!(updated.id, original.id);
    assert_eq!(updated.name, "Updated Product");
    assert_eq!(updated.description, original.description);
    assert_eq!(updated.price, original.price);
    assert_eq!(updated.category, original.category);
    assert_eq!(updated.stock, original.stock);
    assert_eq!(updated.created_at, original.created_at);
    assert!(updated.updated_at >= original.updated_at);

    let reread = product::Entity::find_by_id(original.id.clone()).one(&db).await?.expect("still there");
    assert_eq!(reread.name, "Updated Product");
    Ok(())
}

#[tokio::test]
async fn apply_patch_on_missing_id_is_none() -> Result<()> {
    let db = setup_test_db().await?;
    let patch = product::ProductPatch { name: Some("ghost".into()), ..Default::default() };
    assert!(product::apply_patch(&db, "507f1f77bcf86cd799439011", patch).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn apply_patch_rechecks_bounds() -> Result<()> {
    let db = setup_test_db().await?;
    let original = product::create(&db, sample("Widget")).await?;
    let patch = product::ProductPatch { price: Some(-5.0), ..Default::default() };
    assert!(matches!(
        product::apply_patch(&db, &original.id, patch).await,
        Err(ModelError::Validation(_))
    ));
    let reread = product::find_by_id(&db, &original.id).await?.expect("still there");
    assert_eq!(reread.price, 100.0);
    Ok(())
}

#[tokio::test]
async fn delete_removes_exactly_once() -> Result<()> {
    let db = setup_test_db().await?;
    let keep = product::create(&db, sample("Keep")).await?;
    let gone = product::create(&db, sample("Product to delete")).await?;

    assert!(product::delete_by_id(&db, &gone.id).await?);
    assert!(product::find_by_id(&db, &gone.id).await?.is_none());
    assert!(!product::delete_by_id(&db, &gone.id).await?);

    let listed = product::list_all(&db).await?;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, keep.id);
    Ok(())
}

#[tokio::test]
async fn model_serializes_with_wire_names() -> Result<()> {
    let db = setup_test_db().await?;
    let created = product::create(&db, sample("Serialized")).await?;
    let v = serde_json::to_value(&created)?;
    assert_eq!(v["_id"], created.id.as_str());
    assert!(v.get("createdAt").is_some());
    assert!(v.get("updatedAt").is_some());
    assert!(v.get("releaseDate").is_none());
    assert!(v.get("id").is_none());
    Ok(())
}
