use serde_json::Value;

// One upstream data source, in fallback priority order
#[derive(Debug, Clone)]
pub struct SourceDescriptor {
    pub name: String,
    pub url_template: String, // contains one {query} placeholder
    pub shape: ResponseShape,
}

impl SourceDescriptor {
    pub fn build_url(&self, query: &str) -> String {
        self.url_template.replacen("{query}", query, 1)
    }
}

// Tag for the JSON nesting a source is known to answer with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    DataResult, // {data:{result:[..]}}
    ResultList, // {result:[..]}
    BareArray,  // [..]
}

impl ResponseShape {
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "data-result" => Some(Self::DataResult),
            "result" => Some(Self::ResultList),
            "bare" => Some(Self::BareArray),
            _ => None,
        }
    }
}

// Outcome of a successful multi-source resolution
#[derive(Debug, Clone)]
pub struct LookupResult {
    pub items: Vec<Value>,
    pub source_name: String,
}

// Allow/deny verdict from the quota tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaDecision {
    pub allowed: bool,
    pub remaining: u32,
}

// Recognized query parameters on the root route
#[derive(Debug, Default)]
pub struct LookupParams {
    pub num: Option<String>,
    pub mobile: Option<String>,
    pub number: Option<String>,
    pub email: Option<String>,
}

impl LookupParams {
    // Pick recognized keys out of the raw query string. A repeated key
    // keeps its first value and unknown keys are ignored, so a lookup
    // never bounces off the extractor with an unbranded rejection.
    pub fn from_query(query: &str) -> Self {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query).unwrap_or_default();

        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "num" => &mut params.num,
                "mobile" => &mut params.mobile,
                "number" => &mut params.number,
                "email" => &mut params.email,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }

    // First matching mobile-number alias
    pub fn mobile_param(&self) -> Option<&str> {
        self.num
            .as_deref()
            .or(self.mobile.as_deref())
            .or(self.number.as_deref())
    }
}
