//! UUID-backed identifiers for the project aggregates.

macro_rules! define_uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(::uuid::Uuid);

        impl $name {
            /// Generate a new random identifier.
            pub fn random() -> Self {
                Self(::uuid::Uuid::new_v4())
            }

            /// Wrap an existing UUID.
            pub fn from_uuid(uuid: ::uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// Access the underlying UUID.
            pub fn as_uuid(&self) -> &::uuid::Uuid {
                &self.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                self.0.fmt(f)
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = ::uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                ::uuid::Uuid::parse_str(s).map(Self)
            }
        }
    };
}

define_uuid_id!(
    /// Identifier of a construction project.
    ProjectId
);
define_uuid_id!(
    /// Identifier of a project membership association.
    ProjectMemberId
);
define_uuid_id!(
    /// Identifier of a pricing tender.
    PricingTenderId
);
define_uuid_id!(
    /// Identifier of an offer price submitted against a tender.
    OfferPriceId
);
define_uuid_id!(
    /// Identifier of a comment on an offer price.
    OfferPriceCommentId
);

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn ids_parse_and_display_their_uuid() {
        let uuid = Uuid::new_v4();
        let id: ProjectId = uuid.to_string().parse().expect("valid uuid");
        assert_eq!(id.as_uuid(), &uuid);
        assert_eq!(id.to_string(), uuid.to_string());
    }

    #[test]
    fn ids_serialise_as_bare_strings() {
        let id = OfferPriceId::random();
        let value = serde_json::to_value(id).expect("serialise id");
        assert_eq!(value, serde_json::Value::String(id.to_string()));
    }
}
