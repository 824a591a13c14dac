use serde::{Deserialize, Serialize};

/// Ordered `(key, value)` request parameters; keys may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params {
    pairs: Vec<(String, String)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// Builder-style [`push`](Self::push)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(key, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// First value submitted under `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// Every value submitted under `key`, in submission order
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.iter().filter(move |(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.iter().any(|(k, _)| k == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|(k, _)| k)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl From<Vec<(String, String)>> for Params {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = (&'a str, &'a str);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// Anything that can hand out an ordered parameter sequence
pub trait ParamSource {
    fn params(&self) -> Params;
}

impl ParamSource for Params {
    fn params(&self) -> Params {
        self.clone()
    }
}

impl ParamSource for Vec<(String, String)> {
    fn params(&self) -> Params {
        Params::from(self.clone())
    }
}

impl ParamSource for [(&str, &str)] {
    fn params(&self) -> Params {
        self.iter().copied().collect()
    }
}

impl<const N: usize> ParamSource for [(&str, &str); N] {
    fn params(&self) -> Params {
        self.iter().copied().collect()
    }
}

impl<T: ParamSource + ?Sized> ParamSource for &T {
    fn params(&self) -> Params {
        (**self).params()
    }
}

/// Minimal request adapter exposing a `params` sequence
#[derive(Debug, Clone, Default)]
pub struct Request {
    pub params: Params,
}

impl Request {
    pub fn new(params: impl Into<Params>) -> Self {
        Self {
            params: params.into(),
        }
    }

    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            params: pairs.params(),
        }
    }
}

impl ParamSource for Request {
    fn params(&self) -> Params {
        self.params.clone()
    }
}
