//! Entity identifiers.
//!
//! Every entity is keyed by a newtype over a UUID v7 so ids sort by creation
//! time and cannot be mixed up across entity kinds.

/// Declare a UUID v7 newtype identifier with `Display`, `FromStr` and serde
/// support (serialized as a bare UUID string).
macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub ::uuid::Uuid);

        impl $name {
            /// Create a new id using UUID v7 (time-sortable).
            pub fn new() -> Self {
                Self(::uuid::Uuid::now_v7())
            }

            /// Wrap an existing UUID.
            pub fn from_uuid(uuid: ::uuid::Uuid) -> Self {
                Self(uuid)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = ::uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(::uuid::Uuid::parse_str(s)?))
            }
        }
    };
}

entity_id!(
    /// Identifier of a marketplace user.
    UserId
);
entity_id!(
    /// Identifier of a provider profile.
    ProviderId
);
entity_id!(
    /// Identifier of a customer service request.
    ServiceRequestId
);
entity_id!(
    /// Identifier of a review.
    ReviewId
);
entity_id!(
    /// Identifier of an audit log entry.
    AuditLogId
);
entity_id!(
    /// Identifier of an admin-curated catalog service.
    CatalogServiceId
);
entity_id!(
    /// Identifier of a login session.
    SessionId
);
entity_id!(
    /// Identifier of a pending one-time login code.
    LoginCodeId
);
