//! Catalogue of the console's paged list endpoints
//!
//! Every list view in the console is backed by one `describe*` endpoint.
//! This module records, per resource, the endpoint path, the response key
//! holding the page items, the filterable property keys and which of those
//! carry date-time values.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A resource exposed through a paged list endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Resource {
    /// Remote-desktop sessions
    Sessions,
    /// Hosts running the session agent
    Servers,
    /// Session templates
    SessionTemplates,
    /// Console users
    Users,
    /// User groups
    UserGroups,
}

const SESSION_PROPERTIES: &[&str] = &[
    "SessionIds",
    "SessionNames",
    "Owners",
    "Types",
    "States",
    "Ips",
    "Hostnames",
    "CreationTimes",
    "LastDisconnectionTimes",
    "NumOfConnections",
    "Tags",
];

const SERVER_PROPERTIES: &[&str] = &[
    "Ids",
    "Ips",
    "Hostnames",
    "EndpointIpAddresses",
    "Ports",
    "WebUrlPaths",
    "Protocols",
    "DefaultDnsNames",
    "Versions",
    "SessionManagerAgentVersions",
    "Availabilities",
    "UnavailabilityReasons",
    "ConsoleSessionCounts",
    "VirtualSessionCounts",
    "OsFamilies",
    "OsNames",
    "OsVersions",
    "MemoryTotalBytes",
    "MemoryUsedBytes",
    "SwapTotalBytes",
    "SwapUsedBytes",
    "AwsRegions",
    "AwsEc2InstanceTypes",
    "AwsEc2InstanceIds",
    "CpuVendors",
    "CpuArchitectures",
    "NumberOfCpus",
    "GpuVendors",
    "LoggedInUsers",
    "Tags",
];

const SESSION_TEMPLATE_PROPERTIES: &[&str] = &[
    "Ids",
    "CreatedBy",
    "CreationTimes",
    "Names",
    "Descriptions",
    "OsFamilies",
    "OsVersions",
    "InstanceIds",
    "InstanceTypes",
    "InstanceRegions",
    "HostNumberOfCpus",
    "HostMemoryTotalBytes",
    "LastModifiedTimes",
    "LastModifiedBy",
    "Types",
    "AutorunFiles",
    "MaxConcurrentClients",
    "InitFiles",
    "StorageRoots",
    "PermissionsFiles",
    "Requirements",
    "AutorunFileArguments",
    "DcvGlEnabled",
    "UsersSharedWith",
    "GroupsSharedWith",
];

const USER_PROPERTIES: &[&str] = &[
    "UserIds",
    "DisplayNames",
    "Roles",
    "IsDisabled",
    "DisabledReasons",
    "IsImported",
    "CreationTimes",
    "LastModifiedTimes",
    "LastLoggedInTimes",
    "UserGroupIds",
];

const USER_GROUP_PROPERTIES: &[&str] = &[
    "UserGroupIds",
    "DisplayNames",
    "UserIds",
    "IsImported",
    "CreationTimes",
    "LastModifiedTimes",
];

const DATE_PROPERTIES: &[&str] = &[
    "CreationTimes",
    "LastDisconnectionTimes",
    "LastModifiedTimes",
    "LastLoggedInTimes",
];

impl Resource {
    /// All resources, in display order
    pub const ALL: [Resource; 5] = [
        Resource::Sessions,
        Resource::Servers,
        Resource::SessionTemplates,
        Resource::Users,
        Resource::UserGroups,
    ];

    /// Short CLI name (kebab-case)
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sessions => "sessions",
            Self::Servers => "servers",
            Self::SessionTemplates => "session-templates",
            Self::Users => "users",
            Self::UserGroups => "user-groups",
        }
    }

    /// Path of the list endpoint, relative to the API base URL
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::Sessions => "/describeSessions",
            Self::Servers => "/describeServers",
            Self::SessionTemplates => "/describeSessionTemplates",
            Self::Users => "/describeUsers",
            Self::UserGroups => "/describeUserGroups",
        }
    }

    /// Response key holding the items of a page
    pub fn items_key(&self) -> &'static str {
        match self {
            Self::Sessions => "Sessions",
            Self::Servers => "Servers",
            Self::SessionTemplates => "SessionTemplates",
            Self::Users => "Users",
            Self::UserGroups => "UserGroups",
        }
    }

    /// Property keys the endpoint accepts as filter token arrays
    pub fn filter_properties(&self) -> &'static [&'static str] {
        match self {
            Self::Sessions => SESSION_PROPERTIES,
            Self::Servers => SERVER_PROPERTIES,
            Self::SessionTemplates => SESSION_TEMPLATE_PROPERTIES,
            Self::Users => USER_PROPERTIES,
            Self::UserGroups => USER_GROUP_PROPERTIES,
        }
    }

    /// Default sort column of the table
    pub fn default_sort_column(&self) -> &'static str {
        match self {
            Self::Sessions | Self::SessionTemplates => "Name",
            Self::Servers => "Hostname",
            Self::Users => "DisplayName",
            Self::UserGroups => "DisplayName",
        }
    }

    /// Check whether `property` is a filterable key of this resource
    pub fn accepts_property(&self, property: &str) -> bool {
        self.filter_properties().contains(&property)
    }

    /// Check whether `property` holds date-time values
    pub fn is_date_property(&self, property: &str) -> bool {
        self.accepts_property(property) && DATE_PROPERTIES.contains(&property)
    }

    /// Validate a property key, returning a descriptive error
    pub fn validate_property(&self, property: &str) -> Result<()> {
        if self.accepts_property(property) {
            Ok(())
        } else {
            Err(Error::UnknownProperty {
                resource: self.name().to_string(),
                property: property.to_string(),
            })
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Resource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Resource::ALL
            .into_iter()
            .find(|r| r.name() == s || r.items_key().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::config(format!("Unknown resource: {s}")))
    }
}
