use crate::{ApiKey, ApiMethod, Error};
use url::Url;

pub(crate) const DEFAULT_BASE_URL: &str = "https://proxy6.net/api";

pub(crate) fn normalize_base_url(raw: &str) -> Result<Url, Error> {
    let mut url = Url::parse(raw).map_err(|err| Error::InvalidConfig {
        message: "invalid base_url".into(),
        source: Some(Box::new(err)),
    })?;

    if url.query().is_some() || url.fragment().is_some() {
        return Err(Error::InvalidConfig {
            message: "base_url must not include query or fragment".into(),
            source: None,
        });
    }

    let path = url.path();
    if path != "/" && !path.ends_with('/') {
        url.set_path(&format!("{path}/"));
    }
    Ok(url)
}

/// `{base}/{api_key}/{method}/`, trailing slash included.
pub(crate) fn method_url(base_url: &Url, key: &ApiKey, method: ApiMethod) -> Result<Url, Error> {
    let mut url = base_url.clone();
    {
        let mut path = url.path_segments_mut().map_err(|_| Error::InvalidConfig {
            message: "base_url must be a hierarchical URL".into(),
            source: None,
        })?;
        path.pop_if_empty();
        path.push(key.expose());
        path.push(method.as_str());
        path.push("");
    }
    Ok(url)
}

/// Copy of `url` safe to log: no query, fragment, userinfo or API key.
#[cfg(any(feature = "tracing", test))]
pub(crate) fn sanitize_url(url: &Url, key: &ApiKey) -> Url {
    let mut safe = url.clone();
    safe.set_query(None);
    safe.set_fragment(None);
    let _ = safe.set_username("");
    let _ = safe.set_password(None);

    let secret = key.expose();
    if !secret.is_empty() {
        let encoded = encode_segment(secret);
        let segments: Option<Vec<String>> = safe.path_segments().map(|segments| {
            segments
                .map(|s| {
                    if s == secret || encoded.as_deref() == Some(s) {
                        "<redacted>".to_owned()
                    } else {
                        s.to_owned()
                    }
                })
                .collect()
        });
        if let Some(segments) = segments {
            if let Ok(mut path) = safe.path_segments_mut() {
                path.clear();
                path.extend(segments.iter().map(String::as_str));
            }
        }
    }
    safe
}

/// Percent-encode `segment` exactly the way `method_url` does.
#[cfg(any(feature = "tracing", test))]
fn encode_segment(segment: &str) -> Option<String> {
    let mut scratch = Url::parse("http://localhost/").ok()?;
    scratch.path_segments_mut().ok()?.clear().push(segment);
    scratch.path().strip_prefix('/').map(ToOwned::to_owned)
}
