use serde_json::{json, Value};

pub(crate) const OWNER: &str = "rapidsai";
pub(crate) const REPO: &str = "cudf";
pub(crate) const PR_NUMBER: u64 = 12;
pub(crate) const PR_HEAD_SHA: &str = "f88f7bd4250b963752d615e491b7e676ce5eb7f0";
pub(crate) const AUTHOR: &str = "octo-contributor";

/// A `pull_request` webhook payload, trimmed to the fields GitHub always sends
/// plus a few the handlers ignore.
pub(crate) fn pull_request_event(action: &str) -> Value {
    json!({
        "action": action,
        "number": PR_NUMBER,
        "organization": {
            "login": OWNER,
            "id": 43_887_749,
            "url": format!("https://api.github.com/orgs/{OWNER}"),
        },
        "repository": {
            "id": 90_290_232,
            "name": REPO,
            "full_name": format!("{OWNER}/{REPO}"),
            "owner": { "login": OWNER, "type": "Organization" },
        },
        "pull_request": {
            "number": PR_NUMBER,
            "state": "open",
            "head": {
                "ref": "fix-something",
                "sha": PR_HEAD_SHA,
                "label": format!("{AUTHOR}:fix-something"),
            },
            "base": {
                "ref": "branch-24.06",
                "sha": "a4786471ee4d4e894fec150e426c3551db0f31e0",
            },
        },
        "sender": { "login": AUTHOR, "type": "User" },
    })
}

pub(crate) fn author(login: &str) -> Value {
    let url = format!("https://api.github.com/users/{login}");
    json!({
        "login": login,
        "id": 1,
        "node_id": "MDQ6VXNlcjE=",
        "avatar_url": "https://avatars.githubusercontent.com/u/1?v=4",
        "gravatar_id": "",
        "url": url,
        "html_url": format!("https://github.com/{login}"),
        "followers_url": format!("{url}/followers"),
        "following_url": format!("{url}/following"),
        "gists_url": format!("{url}/gists"),
        "starred_url": format!("{url}/starred"),
        "subscriptions_url": format!("{url}/subscriptions"),
        "organizations_url": format!("{url}/orgs"),
        "repos_url": format!("{url}/repos"),
        "events_url": format!("{url}/events"),
        "received_events_url": format!("{url}/received_events"),
        "type": "User",
        "site_admin": false,
    })
}

/// An issue comment as returned by the REST API.
pub(crate) fn comment(id: u64, login: Option<&str>, body: &str) -> Value {
    json!({
        "id": id,
        "node_id": "IC_kwDOBWGGeM5xyz",
        "url": format!("https://api.github.com/repos/{OWNER}/{REPO}/issues/comments/{id}"),
        "html_url": format!("https://github.com/{OWNER}/{REPO}/pull/{PR_NUMBER}#issuecomment-{id}"),
        "issue_url": format!("https://api.github.com/repos/{OWNER}/{REPO}/issues/{PR_NUMBER}"),
        "body": body,
        "user": login.map(author),
        "author_association": "NONE",
        "created_at": "2024-05-01T12:00:00Z",
        "updated_at": "2024-05-01T12:00:00Z",
    })
}

pub(crate) fn git_ref(name: &str, sha: &str) -> Value {
    json!({
        "ref": format!("refs/heads/{name}"),
        "node_id": "REF_kwDOBWGGeM5xyz",
        "url": format!("https://api.github.com/repos/{OWNER}/{REPO}/git/refs/heads/{name}"),
        "object": {
            "type": "commit",
            "sha": sha,
            "url": format!("https://api.github.com/repos/{OWNER}/{REPO}/git/commits/{sha}"),
        },
    })
}

pub(crate) fn github_error(message: &str) -> Value {
    json!({
        "documentation_url": "https://docs.github.com/rest/git/refs",
        "errors": None::<Vec<Value>>,
        "message": message,
    })
}
