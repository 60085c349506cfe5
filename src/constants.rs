pub(crate) const EXTERNAL_CONTRIBUTORS_FEATURE: &str = "external_contributors";
pub(crate) const MIRROR_BRANCH_PREFIX: &str = "pull-request/";
pub(crate) const EXTERNAL_CONTRIBUTOR_COMMENT: &str = "Pull requests from external contributors require approval from a RAPIDS organization member before CI can begin.";
pub(crate) const PULL_REQUEST_EVENT: &str = "pull_request";
