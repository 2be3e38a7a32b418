//! Crop type administration tests
//!
//! Admin-gated creation and deletion of species templates, the numeric
//! shape checks the engine relies on, and lookups.

use std::sync::Arc;

use chrono::NaiveDate;
use tempfile::TempDir;
use uuid::Uuid;

use cultiva_lab_backend::error::AppError;
use cultiva_lab_backend::services::crop_types::CreateCropTypeInput;
use cultiva_lab_backend::{CropService, CropTypeService, JsonStorage, Storage};
use shared::{User, UserRole};

// ============================================================================
// Fixtures
// ============================================================================

fn test_store() -> (Arc<JsonStorage>, TempDir) {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let dir = TempDir::new().unwrap();
    let store = Arc::new(JsonStorage::new(dir.path().join("database.json")));
    (store, dir)
}

fn seed_user(store: &JsonStorage, role: UserRole) -> User {
    let id = Uuid::new_v4();
    let user = User {
        id,
        username: format!("user-{}", id.simple()),
        password_hash: "not-a-real-hash".to_string(),
        role,
        crop_ids: vec![],
    };
    store.save_user(&user).unwrap();
    user
}

fn wheat_input() -> CreateCropTypeInput {
    CreateCropTypeInput {
        name: "Spring wheat".to_string(),
        optimal_temp: 25.0,
        needed_water: 5.0,
        needed_light: 8.0,
        days_cycle: 10,
        initial_biomass: 1.0,
        potential_performance: 100.0,
    }
}

// ============================================================================
// Creation Tests
// ============================================================================

#[cfg(test)]
mod create_tests {
    use super::*;

    #[test]
    fn test_admin_creates_crop_type() {
        let (store, _dir) = test_store();
        let types = CropTypeService::new(Arc::clone(&store));
        let admin = seed_user(&store, UserRole::Admin);

        let created = types.create_crop_type(admin.id, wheat_input()).unwrap();
        assert_eq!(created.name, "Spring wheat");
        assert_eq!(created.days_cycle, 10);

        let loaded = store.get_crop_type_by_id(created.id).unwrap().unwrap();
        assert_eq!(loaded, created);
    }

    #[test]
    fn test_non_admin_cannot_create_crop_type() {
        let (store, _dir) = test_store();
        let types = CropTypeService::new(Arc::clone(&store));
        let farmer = seed_user(&store, UserRole::User);

        let result = types.create_crop_type(farmer.id, wheat_input());
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_unknown_requester_is_not_found() {
        let (store, _dir) = test_store();
        let types = CropTypeService::new(Arc::clone(&store));

        let ghost = Uuid::new_v4();
        let result = types.create_crop_type(ghost, wheat_input());
        assert!(matches!(result, Err(AppError::UserNotFound(id)) if id == ghost));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let (store, _dir) = test_store();
        let types = CropTypeService::new(Arc::clone(&store));
        let admin = seed_user(&store, UserRole::Admin);

        types.create_crop_type(admin.id, wheat_input()).unwrap();
        let result = types.create_crop_type(admin.id, wheat_input());
        assert!(matches!(result, Err(AppError::CropTypeExists(name)) if name == "Spring wheat"));
    }

    #[test]
    fn test_numeric_shape_checks() {
        let (store, _dir) = test_store();
        let types = CropTypeService::new(Arc::clone(&store));
        let admin = seed_user(&store, UserRole::Admin);

        // The engine divides by the optimal temperature
        let mut input = wheat_input();
        input.optimal_temp = 0.0;
        assert!(matches!(
            types.create_crop_type(admin.id, input),
            Err(AppError::Validation { .. })
        ));

        let mut input = wheat_input();
        input.needed_water = -1.0;
        assert!(matches!(
            types.create_crop_type(admin.id, input),
            Err(AppError::Validation { .. })
        ));

        let mut input = wheat_input();
        input.days_cycle = 0;
        assert!(matches!(
            types.create_crop_type(admin.id, input),
            Err(AppError::Validation { .. })
        ));

        // The biomass ceiling must hold from day zero
        let mut input = wheat_input();
        input.initial_biomass = 150.0;
        assert!(matches!(
            types.create_crop_type(admin.id, input),
            Err(AppError::Validation { .. })
        ));

        let mut input = wheat_input();
        input.potential_performance = f64::NAN;
        assert!(matches!(
            types.create_crop_type(admin.id, input),
            Err(AppError::Validation { .. })
        ));
    }

    #[test]
    fn test_blank_name_rejected() {
        let (store, _dir) = test_store();
        let types = CropTypeService::new(Arc::clone(&store));
        let admin = seed_user(&store, UserRole::Admin);

        let mut input = wheat_input();
        input.name = "  ".to_string();
        let result = types.create_crop_type(admin.id, input);
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[test]
    fn test_zero_requirements_are_allowed() {
        let (store, _dir) = test_store();
        let types = CropTypeService::new(Arc::clone(&store));
        let admin = seed_user(&store, UserRole::Admin);

        // A type needing no water or light is valid; the engine treats
        // those terms as fully satisfied
        let mut input = wheat_input();
        input.needed_water = 0.0;
        input.needed_light = 0.0;
        assert!(types.create_crop_type(admin.id, input).is_ok());
    }
}

// ============================================================================
// Lookup Tests
// ============================================================================

#[cfg(test)]
mod lookup_tests {
    use super::*;

    #[test]
    fn test_lookups_by_id_and_name() {
        let (store, _dir) = test_store();
        let types = CropTypeService::new(Arc::clone(&store));
        let admin = seed_user(&store, UserRole::Admin);

        let wheat = types.create_crop_type(admin.id, wheat_input()).unwrap();
        let mut barley = wheat_input();
        barley.name = "Barley".to_string();
        types.create_crop_type(admin.id, barley).unwrap();

        assert_eq!(types.get_crop_types().unwrap().len(), 2);
        assert_eq!(types.get_crop_type_by_id(wheat.id).unwrap().id, wheat.id);
        assert_eq!(
            types.get_crop_type_by_name("Spring wheat").unwrap().id,
            wheat.id
        );

        let ghost = Uuid::new_v4();
        let result = types.get_crop_type_by_id(ghost);
        assert!(matches!(result, Err(AppError::CropTypeNotFound(id)) if id == ghost));

        let result = types.get_crop_type_by_name("Maize");
        assert!(matches!(result, Err(AppError::CropTypeNameNotFound(name)) if name == "Maize"));
    }
}

// ============================================================================
// Deletion Tests
// ============================================================================

#[cfg(test)]
mod delete_tests {
    use super::*;

    #[test]
    fn test_admin_deletes_unused_crop_type() {
        let (store, _dir) = test_store();
        let types = CropTypeService::new(Arc::clone(&store));
        let admin = seed_user(&store, UserRole::Admin);

        let wheat = types.create_crop_type(admin.id, wheat_input()).unwrap();
        types.delete_crop_type(admin.id, wheat.id).unwrap();
        assert!(store.get_crop_type_by_id(wheat.id).unwrap().is_none());
    }

    #[test]
    fn test_non_admin_cannot_delete_crop_type() {
        let (store, _dir) = test_store();
        let types = CropTypeService::new(Arc::clone(&store));
        let admin = seed_user(&store, UserRole::Admin);
        let farmer = seed_user(&store, UserRole::User);

        let wheat = types.create_crop_type(admin.id, wheat_input()).unwrap();
        let result = types.delete_crop_type(farmer.id, wheat.id);
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
        assert!(store.get_crop_type_by_id(wheat.id).unwrap().is_some());
    }

    #[test]
    fn test_delete_refused_while_crops_reference_the_type() {
        let (store, _dir) = test_store();
        let types = CropTypeService::new(Arc::clone(&store));
        let crops = CropService::new(Arc::clone(&store));
        let admin = seed_user(&store, UserRole::Admin);
        let farmer = seed_user(&store, UserRole::User);

        let wheat = types.create_crop_type(admin.id, wheat_input()).unwrap();
        let start = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let crop = crops
            .create_crop("North field", wheat.id, farmer.id, start)
            .unwrap();

        let result = types.delete_crop_type(admin.id, wheat.id);
        assert!(matches!(result, Err(AppError::Validation { .. })));

        // Once the crop is gone the type can be deleted
        crops.delete_crop(crop.id, farmer.id).unwrap();
        types.delete_crop_type(admin.id, wheat.id).unwrap();
        assert!(store.get_crop_type_by_id(wheat.id).unwrap().is_none());
    }

    #[test]
    fn test_delete_unknown_crop_type() {
        let (store, _dir) = test_store();
        let types = CropTypeService::new(Arc::clone(&store));
        let admin = seed_user(&store, UserRole::Admin);

        let ghost = Uuid::new_v4();
        let result = types.delete_crop_type(admin.id, ghost);
        assert!(matches!(result, Err(AppError::CropTypeNotFound(id)) if id == ghost));
    }
}
