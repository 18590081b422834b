use crate::lexical::parts::ParsedHost;

/// A host split around its registrable domain
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HostDecomposition {
    /// Labels left of the registrable domain (`a.b` in `a.b.example.co.uk`)
    pub subdomain: String,
    /// The registrable label without its public suffix (`example`)
    pub domain: String,
    /// The public suffix (`co.uk`)
    pub suffix: String,
}

impl HostDecomposition {
    /// Number of subdomain labels
    pub fn num_subdomains(&self) -> usize {
        if self.subdomain.is_empty() {
            0
        } else {
            self.subdomain.split('.').count()
        }
    }
}

/// Decomposes a host using the public suffix list
///
/// Naive splitting on `.` gets multi-label suffixes wrong (`bank.co.uk` would
/// report `co` as the domain and `bank` as a subdomain), so the split point
/// comes from the PSL. IP literals are reported whole as the domain.
/// Hosts with no registrable part (`localhost`, a bare suffix) report their
/// first label as the domain.
///
/// # Examples
///
/// ```
/// use phishing_features::lexical::{decompose_host, split_url};
///
/// let host = split_url("https://login.secure.bank.co.uk/").host().unwrap();
/// let parts = decompose_host(&host);
/// assert_eq!(parts.domain, "bank");
/// assert_eq!(parts.suffix, "co.uk");
/// assert_eq!(parts.num_subdomains(), 2);
/// ```
pub fn decompose_host(host: &ParsedHost) -> HostDecomposition {
    let name = match host {
        ParsedHost::Ip(ip) => {
            return HostDecomposition {
                domain: ip.clone(),
                ..HostDecomposition::default()
            };
        }
        ParsedHost::Domain(name) => name.as_str(),
    };

    let registrable = match psl::domain_str(name) {
        Some(registrable) => registrable,
        None => {
            let first = name.split('.').next().unwrap_or(name);
            return HostDecomposition {
                domain: first.to_string(),
                ..HostDecomposition::default()
            };
        }
    };

    let suffix = psl::suffix_str(registrable).unwrap_or("");
    let domain = registrable
        .strip_suffix(suffix)
        .map(|d| d.trim_end_matches('.'))
        .unwrap_or(registrable);
    let subdomain = name
        .strip_suffix(registrable)
        .map(|s| s.trim_end_matches('.'))
        .unwrap_or("");

    HostDecomposition {
        subdomain: subdomain.to_string(),
        domain: domain.to_string(),
        suffix: suffix.to_string(),
    }
}
