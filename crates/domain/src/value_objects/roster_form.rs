//! Decoder for the parallel-array roster form
//!
//! The roster editor posts a group as flat, repeated keys:
//!
//! ```text
//! name, nationality
//! role[], rank[], weapons_<i>[]
//! team_name[], team_<i>_role[], team_<i>_rank[], team_<i>_weapons_<j>[]
//! vehicle_id[], vehicle_<i>_role[], vehicle_<i>_rank[], vehicle_<i>_weapons_<j>[]
//! ```
//!
//! Entries are correlated only by their position, so every array of one
//! member list must agree in length.

use std::collections::HashMap;

use super::names::{GroupName, NationalityCode, TeamName};
use super::roster_spec::{GroupSpec, MemberSpec, TeamSpec, VehicleInstanceSpec};
use crate::error::DomainError;
use crate::{VehicleId, WeaponId};

/// Url-decoded form fields, repeated keys kept in submission order
#[derive(Debug, Clone, Default)]
pub struct RosterForm {
    fields: HashMap<String, Vec<String>>,
}

impl RosterForm {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut fields: HashMap<String, Vec<String>> = HashMap::new();
        for (key, value) in pairs {
            fields.entry(key.into()).or_default().push(value.into());
        }
        Self { fields }
    }

    /// Reassemble the form into a validated [`GroupSpec`].
    ///
    /// # Errors
    ///
    /// - `Validation` for an empty name, nationality or team name, or when a
    ///   rank array does not line up with its role array
    /// - `Parse` for a vehicle or weapon id that is not an integer
    pub fn into_spec(self) -> Result<GroupSpec, DomainError> {
        let name = GroupName::new(self.first("name"))?;
        let nationality = NationalityCode::new(self.first("nationality"))?;

        let members = self.members("role[]", "rank[]", |j| format!("weapons_{j}[]"))?;

        let mut teams = Vec::new();
        for (i, team_name) in self.all("team_name[]").iter().enumerate() {
            let name = TeamName::new(team_name.as_str())?;
            let members = self.members(
                &format!("team_{i}_role[]"),
                &format!("team_{i}_rank[]"),
                |j| format!("team_{i}_weapons_{j}[]"),
            )?;
            teams.push(TeamSpec::new(name, members));
        }

        let mut vehicles = Vec::new();
        for (i, raw_id) in self.all("vehicle_id[]").iter().enumerate() {
            let vehicle_id = parse_id::<VehicleId>("vehicle_id[]", raw_id)?;
            let crew = self.members(
                &format!("vehicle_{i}_role[]"),
                &format!("vehicle_{i}_rank[]"),
                |j| format!("vehicle_{i}_weapons_{j}[]"),
            )?;
            vehicles.push(VehicleInstanceSpec::new(vehicle_id, crew));
        }

        Ok(GroupSpec {
            name,
            nationality,
            members,
            teams,
            vehicles,
        })
    }

    fn first(&self, key: &str) -> &str {
        self.fields
            .get(key)
            .and_then(|v| v.first())
            .map(String::as_str)
            .unwrap_or_default()
    }

    fn all(&self, key: &str) -> &[String] {
        self.fields.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    fn members(
        &self,
        role_key: &str,
        rank_key: &str,
        weapons_key: impl Fn(usize) -> String,
    ) -> Result<Vec<MemberSpec>, DomainError> {
        let roles = self.all(role_key);
        let ranks = self.fields.get(rank_key);

        if let Some(ranks) = ranks {
            if ranks.len() != roles.len() {
                return Err(DomainError::validation(format!(
                    "{} has {} entries but {} has {}",
                    rank_key,
                    ranks.len(),
                    role_key,
                    roles.len()
                )));
            }
        }

        roles
            .iter()
            .enumerate()
            .map(|(j, role)| {
                let rank = ranks.and_then(|r| r.get(j)).cloned().unwrap_or_default();
                let key = weapons_key(j);
                let weapon_ids = self
                    .all(&key)
                    .iter()
                    .filter(|raw| !raw.trim().is_empty())
                    .map(|raw| parse_id::<WeaponId>(&key, raw))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(MemberSpec::new(role.as_str(), rank).with_weapons(weapon_ids))
            })
            .collect()
    }
}

fn parse_id<T>(key: &str, raw: &str) -> Result<T, DomainError>
where
    T: std::str::FromStr<Err = DomainError>,
{
    raw.parse::<T>()
        .map_err(|_| DomainError::parse(format!("{key} holds non-integer id '{raw}'")))
}
