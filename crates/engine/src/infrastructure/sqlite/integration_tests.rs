use std::collections::HashSet;

use orbat_domain::{
    CatalogName, GroupAggregate, GroupId, GroupSpec, MemberId, MemberSpec, NationalityCode,
    VehicleDraft, VehicleId, VehicleInstanceSpec, WeaponDraft, WeaponId,
};
use sqlx::SqlitePool;

use crate::infrastructure::ports::{CatalogRepo, RepoError, RosterRepo};
use crate::infrastructure::sqlite::{self, SqliteCatalogRepo, SqliteRosterRepo};
use crate::test_fixtures::roster_seeder::{self, alpha, group, platoon, SeededCatalog};
use crate::test_fixtures::{count, fail_inserts_of_role, memory_pool};

const BINDING_TABLES: [&str; 5] = [
    "group_members",
    "team_members",
    "group_vehicles",
    "vehicle_members",
    "members_weapons",
];

async fn setup() -> (SqlitePool, SqliteRosterRepo, SeededCatalog) {
    let pool = memory_pool().await;
    let catalog = roster_seeder::seed_catalog(&pool).await;
    (pool.clone(), SqliteRosterRepo::new(pool), catalog)
}

async fn table_count(pool: &SqlitePool, table: &str) -> i64 {
    count(pool, &format!("SELECT COUNT(*) FROM {table}")).await
}

/// Members reachable through anything other than exactly one binding.
async fn multiply_bound_members(pool: &SqlitePool) -> i64 {
    count(
        pool,
        "SELECT COUNT(*) FROM members m WHERE \
         (SELECT COUNT(*) FROM group_members gm WHERE gm.member_id = m.member_id) + \
         (SELECT COUNT(*) FROM team_members tm WHERE tm.member_id = m.member_id) + \
         (SELECT COUNT(*) FROM vehicle_members vm WHERE vm.member_id = m.member_id) <> 1",
    )
    .await
}

fn of_nationality(mut spec: GroupSpec, code: &str) -> GroupSpec {
    spec.nationality = NationalityCode::new(code).expect("valid nationality");
    spec
}

fn member_ids(group: &GroupAggregate) -> HashSet<MemberId> {
    group.member_ids().into_iter().collect()
}

// =============================================================================
// Reader / Writer
// =============================================================================

#[tokio::test]
async fn alpha_scenario_creates_and_cascades() {
    let (pool, roster, catalog) = setup().await;
    let catalog_repo = SqliteCatalogRepo::new(pool.clone());
    let weapons_before = catalog_repo.list_weapons().await.unwrap();

    let id = roster.create_group(&alpha(&catalog)).await.unwrap();
    let group = roster.get_group(id).await.unwrap();

    assert_eq!(group.name(), "Alpha");
    assert_eq!(group.nationality(), "US");
    assert_eq!(group.member_count(), 3);
    assert_eq!(table_count(&pool, "teams").await, 1);
    assert_eq!(table_count(&pool, "members").await, 3);
    assert_eq!(table_count(&pool, "members_weapons").await, 3);
    assert_eq!(
        count(
            &pool,
            &format!("SELECT COUNT(*) FROM members_weapons WHERE weapon_id = {}", catalog.rifle)
        )
        .await,
        1
    );
    assert_eq!(
        count(
            &pool,
            &format!(
                "SELECT COUNT(*) FROM members_weapons WHERE weapon_id = {}",
                catalog.machine_gun
            )
        )
        .await,
        2
    );

    roster.delete_group(id).await.unwrap();

    for table in BINDING_TABLES {
        assert_eq!(table_count(&pool, table).await, 0, "{table} not emptied");
    }
    assert_eq!(table_count(&pool, "members").await, 0);
    assert_eq!(table_count(&pool, "teams").await, 0);
    assert_eq!(table_count(&pool, "groups").await, 0);
    assert_eq!(catalog_repo.list_weapons().await.unwrap(), weapons_before);
    assert!(roster.get_group(id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn read_reproduces_written_shape() {
    let (pool, roster, catalog) = setup().await;
    let spec = platoon(&catalog, "1st Platoon");

    let id = roster.create_group(&spec).await.unwrap();
    let group = roster.get_group(id).await.unwrap();

    assert_eq!(group.direct_members().len(), spec.members.len());
    assert_eq!(group.teams().len(), 2);
    let team_sizes: Vec<_> = group.teams().iter().map(|t| (t.size, t.members.len())).collect();
    assert_eq!(team_sizes, vec![(2, 2), (3, 3)]);
    let crews: Vec<_> = group
        .vehicles()
        .iter()
        .map(|v| (v.vehicle.id, v.crew.len()))
        .collect();
    assert_eq!(crews, vec![(catalog.humvee, 2), (catalog.bradley, 3)]);

    assert_eq!(group.member_count(), 12);
    assert_eq!(usize::try_from(group.member_count()).unwrap(), spec.total_members());
    assert!(group.is_size_consistent());
    assert!(group.has_exclusive_membership());
    assert_eq!(multiply_bound_members(&pool).await, 0);

    let automatic_rifleman = &group.teams()[1].members[1];
    assert_eq!(automatic_rifleman.role, "Automatic Rifleman");
    let carried: Vec<_> = automatic_rifleman.weapons.iter().map(|w| w.id).collect();
    assert_eq!(carried, vec![catalog.machine_gun, catalog.pistol]);
    assert_eq!(table_count(&pool, "members_weapons").await, 10);
}

#[tokio::test]
async fn reads_are_deterministic() {
    let (_pool, roster, catalog) = setup().await;
    let id = roster.create_group(&platoon(&catalog, "P")).await.unwrap();

    let first = roster.get_group(id).await.unwrap();
    let second = roster.get_group(id).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn list_groups_orders_by_name() {
    let (_pool, roster, catalog) = setup().await;
    roster.create_group(&platoon(&catalog, "Charlie")).await.unwrap();
    roster.create_group(&alpha(&catalog)).await.unwrap();
    roster.create_group(&group("Bravo", "UK")).await.unwrap();

    let names: Vec<_> = roster
        .list_groups()
        .await
        .unwrap()
        .into_iter()
        .map(|g| (g.name, g.member_count))
        .collect();

    assert_eq!(
        names,
        vec![
            ("Alpha".to_string(), 3),
            ("Bravo".to_string(), 0),
            ("Charlie".to_string(), 12)
        ]
    );
}

#[tokio::test]
async fn unknown_weapon_ids_are_skipped() {
    let (pool, roster, catalog) = setup().await;
    let spec = group("Delta", "CA").with_member(
        MemberSpec::new("Sniper", "CPL").with_weapons([WeaponId::new(999), catalog.rifle]),
    );

    let id = roster.create_group(&spec).await.unwrap();
    let group = roster.get_group(id).await.unwrap();

    assert_eq!(group.direct_members()[0].weapons.len(), 1);
    assert_eq!(group.direct_members()[0].weapons[0].id, catalog.rifle);
    assert_eq!(table_count(&pool, "members_weapons").await, 1);
}

#[tokio::test]
async fn unknown_vehicle_fails_without_trace() {
    let (pool, roster, catalog) = setup().await;
    let spec = alpha(&catalog).with_vehicle(VehicleInstanceSpec::new(
        VehicleId::new(404),
        vec![MemberSpec::new("Driver", "PVT")],
    ));

    let err = roster.create_group(&spec).await.unwrap_err();

    assert!(matches!(err, RepoError::Validation(ref msg) if msg.contains("404")));
    assert_eq!(table_count(&pool, "groups").await, 0);
    assert_eq!(table_count(&pool, "members").await, 0);
    assert_eq!(table_count(&pool, "teams").await, 0);
}

// =============================================================================
// Atomicity
// =============================================================================

fn with_saboteur(mut spec: GroupSpec) -> GroupSpec {
    spec.vehicles
        .last_mut()
        .expect("spec has vehicles")
        .crew
        .push(MemberSpec::new("Saboteur", "PVT"));
    spec
}

#[tokio::test]
async fn failed_create_leaves_nothing_behind() {
    let (pool, roster, catalog) = setup().await;
    fail_inserts_of_role(&pool, "Saboteur").await;

    let err = roster
        .create_group(&with_saboteur(platoon(&catalog, "Doomed")))
        .await
        .unwrap_err();

    assert!(matches!(err, RepoError::Database { .. }));
    assert!(roster.list_groups().await.unwrap().is_empty());
    assert_eq!(table_count(&pool, "members").await, 0);
    assert_eq!(table_count(&pool, "teams").await, 0);
    for table in BINDING_TABLES {
        assert_eq!(table_count(&pool, table).await, 0, "{table} has partial rows");
    }
}

#[tokio::test]
async fn failed_edit_keeps_previous_aggregate() {
    let (pool, roster, catalog) = setup().await;
    let id = roster.create_group(&alpha(&catalog)).await.unwrap();
    let before = roster.get_group(id).await.unwrap();
    fail_inserts_of_role(&pool, "Saboteur").await;

    let err = roster
        .replace_group(id, &with_saboteur(platoon(&catalog, "Alpha")), Some(before.version()))
        .await
        .unwrap_err();

    assert!(matches!(err, RepoError::Database { .. }));
    assert_eq!(roster.get_group(id).await.unwrap(), before);
    assert_eq!(table_count(&pool, "members").await, 3);
}

// =============================================================================
// Edit
// =============================================================================

#[tokio::test]
async fn replace_keeps_id_and_renews_members() {
    let (pool, roster, catalog) = setup().await;
    let id = roster.create_group(&alpha(&catalog)).await.unwrap();
    let before = roster.get_group(id).await.unwrap();

    roster
        .replace_group(id, &platoon(&catalog, "Alpha Reinforced"), Some(0))
        .await
        .unwrap();
    let after = roster.get_group(id).await.unwrap();

    assert_eq!(after.id(), id);
    assert_eq!(after.name(), "Alpha Reinforced");
    assert_eq!(after.version(), 1);
    assert_eq!(after.member_count(), 12);
    assert!(after.is_size_consistent());
    assert!(member_ids(&before).is_disjoint(&member_ids(&after)));
    assert_eq!(table_count(&pool, "members").await, 12);
    assert_eq!(table_count(&pool, "teams").await, 2);
    assert_eq!(multiply_bound_members(&pool).await, 0);
}

#[tokio::test]
async fn stale_version_is_rejected() {
    let (_pool, roster, catalog) = setup().await;
    let id = roster.create_group(&alpha(&catalog)).await.unwrap();

    roster
        .replace_group(id, &platoon(&catalog, "First Edit"), Some(0))
        .await
        .unwrap();
    let current = roster.get_group(id).await.unwrap();

    let err = roster
        .replace_group(id, &group("Second Edit", "US"), Some(0))
        .await
        .unwrap_err();

    assert!(matches!(err, RepoError::Conflict(_)));
    assert_eq!(roster.get_group(id).await.unwrap(), current);
}

#[tokio::test]
async fn unguarded_replace_skips_version_check() {
    let (_pool, roster, catalog) = setup().await;
    let id = roster.create_group(&alpha(&catalog)).await.unwrap();

    roster.replace_group(id, &alpha(&catalog), None).await.unwrap();
    roster.replace_group(id, &alpha(&catalog), None).await.unwrap();

    assert_eq!(roster.get_group(id).await.unwrap().version(), 2);
}

#[tokio::test]
async fn concurrent_edits_serialize() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite:{}?mode=rwc", dir.path().join("roster.db").display());
    let pool = sqlite::connect(&url, 2).await.unwrap();
    sqlite::ensure_schema(&pool).await.unwrap();
    let catalog = roster_seeder::seed_catalog(&pool).await;
    let roster = SqliteRosterRepo::new(pool.clone());
    let id = roster.create_group(&alpha(&catalog)).await.unwrap();

    let first_spec = platoon(&catalog, "Editor One");
    let second_spec = alpha(&catalog);
    let (first, second) = tokio::join!(
        roster.replace_group(id, &first_spec, Some(0)),
        roster.replace_group(id, &second_spec, Some(0)),
    );

    assert_eq!(first.is_ok() as u8 + second.is_ok() as u8, 1);
    let group = roster.get_group(id).await.unwrap();
    assert_eq!(group.version(), 1);
    assert!(group.is_size_consistent());
    assert_eq!(
        count(&pool, "SELECT COUNT(*) FROM members").await,
        group.member_count()
    );
}

#[tokio::test]
async fn missing_group_is_not_found() {
    let (_pool, roster, catalog) = setup().await;

    let err = roster
        .replace_group(GroupId::new(77), &alpha(&catalog), None)
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    let err = roster.delete_group(GroupId::new(77)).await.unwrap_err();
    assert!(err.is_not_found());
}

// =============================================================================
// Cascade
// =============================================================================

#[tokio::test]
async fn delete_leaves_other_groups_untouched() {
    let (pool, roster, catalog) = setup().await;
    let doomed = roster.create_group(&platoon(&catalog, "Doomed")).await.unwrap();
    let survivor = roster.create_group(&platoon(&catalog, "Survivor")).await.unwrap();
    let snapshot = roster.get_group(survivor).await.unwrap();

    roster.delete_group(doomed).await.unwrap();

    assert_eq!(roster.get_group(survivor).await.unwrap(), snapshot);
    assert_eq!(table_count(&pool, "members").await, 12);
    assert_eq!(table_count(&pool, "teams").await, 2);
    assert_eq!(table_count(&pool, "group_vehicles").await, 2);
    assert_eq!(table_count(&pool, "members_weapons").await, 10);
    assert_eq!(table_count(&pool, "vehicles").await, 2);
    assert_eq!(table_count(&pool, "weapons").await, 3);
}

#[tokio::test]
async fn owned_rows_cover_every_binding_path() {
    let (pool, roster, catalog) = setup().await;
    let id = roster.create_group(&platoon(&catalog, "P")).await.unwrap();
    let group = roster.get_group(id).await.unwrap();

    let mut conn = pool.acquire().await.unwrap();
    let owned = sqlite::cascade::OwnedRows::collect(&mut conn, id).await.unwrap();

    assert_eq!(owned.member_ids.len(), 12);
    assert_eq!(owned.member_ids.iter().copied().collect::<HashSet<_>>(), member_ids(&group));
    assert_eq!(owned.team_ids, group.teams().iter().map(|t| t.id).collect::<Vec<_>>());
    assert_eq!(
        owned.instance_ids,
        group.vehicles().iter().map(|v| v.instance_id).collect::<Vec<_>>()
    );
}

// =============================================================================
// Member weapons
// =============================================================================

#[tokio::test]
async fn member_weapons_are_replaced() {
    let (_pool, roster, catalog) = setup().await;
    let id = roster.create_group(&alpha(&catalog)).await.unwrap();
    let rifleman = roster.get_group(id).await.unwrap().direct_members()[0].id;

    roster
        .replace_member_weapons(rifleman, &[catalog.pistol, WeaponId::new(999)])
        .await
        .unwrap();
    let loadout = roster.member_loadout(rifleman).await.unwrap();

    assert_eq!(loadout.current.iter().map(|w| w.id).collect::<Vec<_>>(), vec![catalog.pistol]);
    assert_eq!(loadout.catalog.len(), 3);
    assert!(loadout.carries(&loadout.current[0]));

    let err = roster
        .replace_member_weapons(MemberId::new(999), &[catalog.pistol])
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(roster.member_loadout(MemberId::new(999)).await.unwrap_err().is_not_found());
}

// =============================================================================
// Catalog
// =============================================================================

#[tokio::test]
async fn duplicate_catalog_name_conflicts_unless_replacing() {
    let (pool, _roster, _catalog) = setup().await;
    let repo = SqliteCatalogRepo::new(pool);
    let draft = WeaponDraft::new(CatalogName::new("M4A1").unwrap(), "Carbine", "5.56 NATO");

    let err = repo.upsert_weapon(&draft, false).await.unwrap_err();
    assert!(matches!(err, RepoError::Conflict(_)));

    let id = repo.upsert_weapon(&draft, true).await.unwrap();
    let weapon = repo.get_weapon(id).await.unwrap();
    assert_eq!(weapon.caliber, "5.56 NATO");
    assert_eq!(weapon.image_url.as_deref(), Some("m4a1.png"));
    assert_eq!(repo.find_weapon_by_name("M4A1").await.unwrap(), Some(id));
    assert_eq!(repo.list_weapons().await.unwrap().len(), 3);

    let vehicle = VehicleDraft::new(CatalogName::new("M2A3").unwrap(), "IFV", "TOW")
        .with_image_url("bradley.png");
    let vehicle_id = repo.upsert_vehicle(&vehicle, true).await.unwrap();
    let stored = repo.get_vehicle(vehicle_id).await.unwrap();
    assert_eq!(stored.armament, "TOW");
    assert_eq!(stored.image_url.as_deref(), Some("bradley.png"));
}

#[tokio::test]
async fn catalog_lookups() {
    let (pool, _roster, catalog) = setup().await;
    let repo = SqliteCatalogRepo::new(pool);

    assert!(repo.weapon_exists(catalog.rifle).await.unwrap());
    assert!(!repo.weapon_exists(WeaponId::new(999)).await.unwrap());
    assert!(repo.vehicle_exists(catalog.humvee).await.unwrap());
    assert_eq!(repo.find_vehicle_by_name("M1151").await.unwrap(), Some(catalog.humvee));
    assert_eq!(repo.find_vehicle_by_name("T-72").await.unwrap(), None);
    assert!(repo.get_vehicle(VehicleId::new(999)).await.unwrap_err().is_not_found());

    let names: Vec<_> = repo
        .list_vehicles()
        .await
        .unwrap()
        .into_iter()
        .map(|v| v.name)
        .collect();
    assert_eq!(names, vec!["M1151".to_string(), "M2A3".to_string()]);
}

#[tokio::test]
async fn deleting_weapon_only_drops_its_bindings() {
    let (pool, roster, catalog) = setup().await;
    let repo = SqliteCatalogRepo::new(pool.clone());
    let id = roster.create_group(&platoon(&catalog, "P")).await.unwrap();

    let image = repo.delete_weapon(catalog.rifle).await.unwrap();

    assert_eq!(image.as_deref(), Some("m4a1.png"));
    assert_eq!(table_count(&pool, "weapons").await, 2);
    assert_eq!(table_count(&pool, "members_weapons").await, 4);
    let group = roster.get_group(id).await.unwrap();
    assert_eq!(group.member_count(), 12);
    assert!(group.members().all(|m| m.weapons.iter().all(|w| w.id != catalog.rifle)));
    assert!(repo.delete_weapon(catalog.rifle).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn deleting_vehicle_removes_crews_and_resizes_groups() {
    let (pool, roster, catalog) = setup().await;
    let repo = SqliteCatalogRepo::new(pool.clone());
    let id = roster.create_group(&platoon(&catalog, "P")).await.unwrap();

    let image = repo.delete_vehicle(catalog.humvee).await.unwrap();

    assert_eq!(image.as_deref(), Some("m1151.png"));
    let group = roster.get_group(id).await.unwrap();
    assert_eq!(group.vehicles().len(), 1);
    assert_eq!(group.member_count(), 10);
    assert_eq!(group.version(), 1);
    assert!(group.is_size_consistent());
    assert_eq!(table_count(&pool, "members").await, 10);
    assert_eq!(multiply_bound_members(&pool).await, 0);
    assert!(!repo.vehicle_exists(catalog.humvee).await.unwrap());
}

#[tokio::test]
async fn weapon_usage_groups_members_by_group() {
    let (pool, roster, catalog) = setup().await;
    let repo = SqliteCatalogRepo::new(pool);
    roster.create_group(&platoon(&catalog, "Zulu")).await.unwrap();
    roster
        .create_group(&of_nationality(alpha(&catalog), "UK"))
        .await
        .unwrap();

    let usage = repo.weapon_usage(catalog.rifle).await.unwrap();

    assert_eq!(usage.weapon.id, catalog.rifle);
    assert_eq!(usage.usage.total_members, 7);
    let groups: Vec<_> = usage
        .usage
        .groups
        .iter()
        .map(|g| (g.group_name.as_str(), g.members.len()))
        .collect();
    assert_eq!(groups, vec![("Alpha", 1), ("Zulu", 6)]);
    assert_eq!(usage.usage.nationalities, vec!["UK".to_string(), "US".to_string()]);
    let team_members = usage.usage.groups[1]
        .members
        .iter()
        .filter(|m| m.team_name.is_some())
        .count();
    assert_eq!(team_members, 4);
}

#[tokio::test]
async fn vehicle_usage_counts_instances_and_crew() {
    let (pool, roster, catalog) = setup().await;
    let repo = SqliteCatalogRepo::new(pool);
    roster.create_group(&platoon(&catalog, "One")).await.unwrap();
    roster.create_group(&platoon(&catalog, "Two")).await.unwrap();

    let usage = repo.vehicle_usage(catalog.bradley).await.unwrap();

    assert_eq!(usage.instance_count, 2);
    assert_eq!(usage.usage.total_members, 6);
    assert_eq!(usage.usage.groups.len(), 2);
    assert_eq!(usage.usage.nationality_count(), 1);
}

// =============================================================================
// Nationalities
// =============================================================================

#[tokio::test]
async fn nationality_rollup_counts_distinct_users_and_instances() {
    let (pool, roster, catalog) = setup().await;
    let repo = SqliteCatalogRepo::new(pool);
    roster.create_group(&platoon(&catalog, "Zulu")).await.unwrap();
    roster.create_group(&alpha(&catalog)).await.unwrap();
    roster
        .create_group(&of_nationality(platoon(&catalog, "Redcoats"), "UK"))
        .await
        .unwrap();
    roster
        .create_group(&of_nationality(platoon(&catalog, "Guards"), "UK"))
        .await
        .unwrap();

    assert_eq!(
        repo.list_nationalities().await.unwrap(),
        vec!["UK".to_string(), "US".to_string()]
    );

    let us = repo.nationality_usage("US").await.unwrap();
    let groups: Vec<_> = us.groups.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(groups, vec!["Alpha", "Zulu"]);
    assert_eq!(us.member_count(), 15);
    let weapons: Vec<_> = us.weapons.iter().map(|w| (w.weapon.id, w.user_count)).collect();
    assert_eq!(
        weapons,
        vec![(catalog.pistol, 3), (catalog.machine_gun, 3), (catalog.rifle, 7)]
    );
    let vehicles: Vec<_> = us
        .vehicles
        .iter()
        .map(|v| (v.vehicle.id, v.instance_count))
        .collect();
    assert_eq!(vehicles, vec![(catalog.humvee, 1), (catalog.bradley, 1)]);

    let uk = repo.nationality_usage("UK").await.unwrap();
    let groups: Vec<_> = uk.groups.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(groups, vec!["Guards", "Redcoats"]);
    let weapons: Vec<_> = uk.weapons.iter().map(|w| (w.weapon.id, w.user_count)).collect();
    assert_eq!(
        weapons,
        vec![(catalog.pistol, 6), (catalog.machine_gun, 2), (catalog.rifle, 12)]
    );
    let vehicles: Vec<_> = uk
        .vehicles
        .iter()
        .map(|v| (v.vehicle.id, v.instance_count))
        .collect();
    assert_eq!(vehicles, vec![(catalog.humvee, 2), (catalog.bradley, 2)]);
}

#[tokio::test]
async fn nationality_codes_match_as_stored() {
    let (pool, roster, catalog) = setup().await;
    let repo = SqliteCatalogRepo::new(pool);
    roster.create_group(&group("Lancers", "PL")).await.unwrap();

    let lancers = repo.nationality_usage("PL").await.unwrap();
    assert_eq!(lancers.groups.len(), 1);
    assert!(lancers.weapons.is_empty());
    assert!(lancers.vehicles.is_empty());

    assert!(repo.nationality_usage("pl").await.unwrap_err().is_not_found());
    assert!(repo.nationality_usage("Poland").await.unwrap_err().is_not_found());

    roster.create_group(&alpha(&catalog)).await.unwrap();
    assert_eq!(
        repo.list_nationalities().await.unwrap(),
        vec!["PL".to_string(), "US".to_string()]
    );
}

// =============================================================================
// Empty collections
// =============================================================================

#[tokio::test]
async fn empty_team_and_crewless_vehicle_round_trip() {
    let (pool, roster, catalog) = setup().await;
    let spec = group("Skeleton", "US")
        .with_member(MemberSpec::new("Commander", "CPT"))
        .with_team(roster_seeder::team("Reserve", Vec::new()))
        .with_vehicle(VehicleInstanceSpec::new(catalog.humvee, Vec::new()));

    let id = roster.create_group(&spec).await.unwrap();
    let group = roster.get_group(id).await.unwrap();

    assert_eq!(group.teams().len(), 1);
    assert_eq!(group.teams()[0].size, 0);
    assert!(group.teams()[0].members.is_empty());
    assert_eq!(group.vehicles().len(), 1);
    assert!(group.vehicles()[0].crew.is_empty());
    assert_eq!(group.member_count(), 1);
    assert!(group.is_size_consistent());

    roster.delete_group(id).await.unwrap();
    assert_eq!(table_count(&pool, "teams").await, 0);
    assert_eq!(table_count(&pool, "group_vehicles").await, 0);
    assert_eq!(table_count(&pool, "members").await, 0);
}
