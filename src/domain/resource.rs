//! Resource kinds managed by the dashboard and their list screens.
use serde::{Deserialize, Serialize};

use crate::domain::filter::{FilterCodec, FilterDimension};
use crate::domain::types::{TypeConstraintError, validate_dimension_key};

pub const ELEMENTS: &[&str] = &["pyro", "hydro", "anemo", "electro", "dendro", "cryo", "geo"];
pub const WEAPON_TYPES: &[&str] = &["sword", "claymore", "polearm", "bow", "catalyst"];
pub const USER_ROLES: &[&str] = &["admin", "user"];

const IS_ACTIVE: FilterDimension = FilterDimension::single("is_active", FilterCodec::Boolean);
const RARITY: FilterDimension = FilterDimension::multi("rarity", FilterCodec::Integer);
const WEAPON_TYPE: FilterDimension =
    FilterDimension::multi("weapon_type", FilterCodec::OneOf(WEAPON_TYPES));

const CHARACTER_FILTERS: &[FilterDimension] = &[
    FilterDimension::multi("element", FilterCodec::OneOf(ELEMENTS)),
    RARITY,
    WEAPON_TYPE,
    IS_ACTIVE,
];
const WEAPON_FILTERS: &[FilterDimension] = &[WEAPON_TYPE, RARITY, IS_ACTIVE];
const STAFF_FILTERS: &[FilterDimension] = &[
    FilterDimension::multi("role_id", FilterCodec::Integer),
    FilterDimension::multi("department", FilterCodec::Text),
    IS_ACTIVE,
];
const USER_FILTERS: &[FilterDimension] = &[
    FilterDimension::multi("role", FilterCodec::OneOf(USER_ROLES)),
    IS_ACTIVE,
];
const ACTIVE_ONLY_FILTERS: &[FilterDimension] = &[IS_ACTIVE];

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Character,
    Weapon,
    Staff,
    StaffRole,
    User,
    CostMilestone,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 6] = [
        ResourceKind::Character,
        ResourceKind::Weapon,
        ResourceKind::Staff,
        ResourceKind::StaffRole,
        ResourceKind::User,
        ResourceKind::CostMilestone,
    ];

    /// Path segment of the list route.
    pub fn slug(self) -> &'static str {
        match self {
            ResourceKind::Character => "characters",
            ResourceKind::Weapon => "weapons",
            ResourceKind::Staff => "staffs",
            ResourceKind::StaffRole => "staff-roles",
            ResourceKind::User => "users",
            ResourceKind::CostMilestone => "cost-milestones",
        }
    }

    pub fn screen(self) -> ListScreen {
        let filters = match self {
            ResourceKind::Character => CHARACTER_FILTERS,
            ResourceKind::Weapon => WEAPON_FILTERS,
            ResourceKind::Staff => STAFF_FILTERS,
            ResourceKind::User => USER_FILTERS,
            ResourceKind::StaffRole | ResourceKind::CostMilestone => ACTIVE_ONLY_FILTERS,
        };
        ListScreen {
            resource: self,
            filters,
        }
    }
}

/// The fixed filter layout of one list screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListScreen {
    pub resource: ResourceKind,
    pub filters: &'static [FilterDimension],
}

impl ListScreen {
    pub fn dimension(&self, key: &str) -> Option<&'static FilterDimension> {
        self.filters.iter().find(|dimension| dimension.key == key)
    }

    /// Checks that every dimension key is usable in the location query.
    pub fn validate(&self) -> Result<(), TypeConstraintError> {
        for (index, dimension) in self.filters.iter().enumerate() {
            validate_dimension_key(dimension.key)?;
            if self.filters[..index]
                .iter()
                .any(|other| other.key == dimension.key)
            {
                return Err(TypeConstraintError::InvalidValue(format!(
                    "duplicate filter `{}`",
                    dimension.key
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filter::{Cardinality, FilterValue};

    #[test]
    fn every_screen_has_valid_keys() {
        for kind in ResourceKind::ALL {
            assert_eq!(kind.screen().validate(), Ok(()), "{kind:?}");
        }
    }

    #[test]
    fn character_screen_exposes_element_filter() {
        let screen = ResourceKind::Character.screen();
        let element = screen.dimension("element").unwrap();
        assert_eq!(element.cardinality, Cardinality::Multi);
        assert!(screen.dimension("role").is_none());
        assert_eq!(screen.dimension("is_active").unwrap().cardinality, Cardinality::Single);
    }

    #[test]
    fn staff_screen_filters_by_free_text_department() {
        let department = ResourceKind::Staff.screen().dimension("department").unwrap();
        assert_eq!(department.codec, FilterCodec::Text);
        assert_eq!(
            department.codec.decode("Art & Design").unwrap(),
            FilterValue::text("Art & Design")
        );
        assert!(department.codec.decode("  ").is_err());
    }

    #[test]
    fn duplicate_keys_fail_validation() {
        static DUPES: &[FilterDimension] = &[IS_ACTIVE, IS_ACTIVE];
        let screen = ListScreen {
            resource: ResourceKind::User,
            filters: DUPES,
        };
        assert!(screen.validate().is_err());
    }
}
