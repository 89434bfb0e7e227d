//! Seed data: a small catalog and a few representative rosters.

use orbat_domain::{
    CatalogName, GroupName, GroupSpec, MemberSpec, NationalityCode, TeamName, TeamSpec,
    VehicleDraft, VehicleId, VehicleInstanceSpec, WeaponDraft, WeaponId,
};
use sqlx::SqlitePool;

use crate::infrastructure::ports::CatalogRepo;
use crate::infrastructure::sqlite::SqliteCatalogRepo;

/// Ids of the seeded catalog entries.
#[derive(Debug, Clone, Copy)]
pub struct SeededCatalog {
    pub rifle: WeaponId,
    pub machine_gun: WeaponId,
    pub pistol: WeaponId,
    pub humvee: VehicleId,
    pub bradley: VehicleId,
}

pub async fn seed_catalog(pool: &SqlitePool) -> SeededCatalog {
    let repo = SqliteCatalogRepo::new(pool.clone());

    let weapon = |name: &str, kind: &str, caliber: &str| {
        WeaponDraft::new(CatalogName::new(name).expect("valid name"), kind, caliber)
    };
    let vehicle = |name: &str, kind: &str, armament: &str| {
        VehicleDraft::new(CatalogName::new(name).expect("valid name"), kind, armament)
    };

    SeededCatalog {
        rifle: repo
            .upsert_weapon(
                &weapon("M4A1", "Carbine", "5.56x45mm").with_image_url("m4a1.png"),
                false,
            )
            .await
            .expect("seed rifle"),
        machine_gun: repo
            .upsert_weapon(&weapon("M249", "Light machine gun", "5.56x45mm"), false)
            .await
            .expect("seed machine gun"),
        pistol: repo
            .upsert_weapon(&weapon("M17", "Pistol", "9x19mm"), false)
            .await
            .expect("seed pistol"),
        humvee: repo
            .upsert_vehicle(
                &vehicle("M1151", "Light utility vehicle", "M2HB").with_image_url("m1151.png"),
                false,
            )
            .await
            .expect("seed humvee"),
        bradley: repo
            .upsert_vehicle(&vehicle("M2A3", "Infantry fighting vehicle", "M242 25mm"), false)
            .await
            .expect("seed bradley"),
    }
}

pub fn group(name: &str, nationality: &str) -> GroupSpec {
    GroupSpec::new(
        GroupName::new(name).expect("valid group name"),
        NationalityCode::new(nationality).expect("valid nationality"),
    )
}

pub fn team(name: &str, members: Vec<MemberSpec>) -> TeamSpec {
    TeamSpec::new(TeamName::new(name).expect("valid team name"), members)
}

/// "Alpha": one direct rifleman with a rifle, team "Bravo" of two gunners.
pub fn alpha(catalog: &SeededCatalog) -> GroupSpec {
    group("Alpha", "US")
        .with_member(MemberSpec::new("Rifleman", "PFC").with_weapons([catalog.rifle]))
        .with_team(team(
            "Bravo",
            vec![
                MemberSpec::new("Automatic Rifleman", "SPC").with_weapons([catalog.machine_gun]),
                MemberSpec::new("Assistant Gunner", "PFC").with_weapons([catalog.machine_gun]),
            ],
        ))
}

/// A platoon touching every binding path: 2 direct, 2 teams of 2 and 3, two vehicles.
pub fn platoon(catalog: &SeededCatalog, name: &str) -> GroupSpec {
    group(name, "US")
        .with_member(MemberSpec::new("Platoon Leader", "2LT").with_weapons([catalog.pistol]))
        .with_member(MemberSpec::new("Platoon Sergeant", "SFC").with_weapons([catalog.rifle]))
        .with_team(team(
            "Alpha Team",
            vec![
                MemberSpec::new("Team Leader", "SGT").with_weapons([catalog.rifle]),
                MemberSpec::new("Grenadier", "SPC").with_weapons([catalog.rifle]),
            ],
        ))
        .with_team(team(
            "Bravo Team",
            vec![
                MemberSpec::new("Team Leader", "SGT").with_weapons([catalog.rifle]),
                MemberSpec::new("Automatic Rifleman", "SPC")
                    .with_weapons([catalog.machine_gun, catalog.pistol]),
                MemberSpec::new("Rifleman", "PFC").with_weapons([catalog.rifle]),
            ],
        ))
        .with_vehicle(VehicleInstanceSpec::new(
            catalog.humvee,
            vec![
                MemberSpec::new("Driver", "PFC").with_weapons([catalog.rifle]),
                MemberSpec::new("Gunner", "SPC"),
            ],
        ))
        .with_vehicle(VehicleInstanceSpec::new(
            catalog.bradley,
            vec![
                MemberSpec::new("Commander", "SSG").with_weapons([catalog.pistol]),
                MemberSpec::new("Gunner", "SGT"),
                MemberSpec::new("Driver", "SPC"),
            ],
        ))
}
