use pyo3::create_exception;
use pyo3::exceptions::{PyException, PyIOError};
use pyo3::prelude::*;
use pyo3::types::{PyBytes, PyList, PyLong};
use sbf_core::{BloomError, FilterHandle, OwnedKey};

create_exception!(shaped_bloom_filter, BloomFilterIncorrectConstructorValues, PyException);
create_exception!(shaped_bloom_filter, BloomFilterIncorrectInputException, PyException);
create_exception!(shaped_bloom_filter, BloomFilterInvalidParameter, PyException);
create_exception!(shaped_bloom_filter, BloomFilterDeserializationError, PyException);
create_exception!(shaped_bloom_filter, BloomFilterIncompatible, PyException);

fn to_py_err(e: BloomError) -> PyErr {
    match e {
        BloomError::InvalidConstruction(msg) => BloomFilterIncorrectConstructorValues::new_err(msg),
        BloomError::InvalidParameter(msg) => BloomFilterInvalidParameter::new_err(msg),
        BloomError::Deserialization(msg) => BloomFilterDeserializationError::new_err(msg),
        e @ BloomError::IncompatibleFilter { .. } => BloomFilterIncompatible::new_err(e.to_string()),
        other => PyIOError::new_err(other.to_string()),
    }
}

/// bytes -> as-is, list[int] -> bytes, int -> the same u64 key `add`/`is_member` use.
fn member_key(var: &Bound<'_, PyAny>) -> PyResult<OwnedKey> {
    if let Ok(b) = var.downcast::<PyBytes>() {
        return Ok(OwnedKey::Bytes(b.as_bytes().to_vec()));
    }
    if var.is_instance_of::<PyLong>() {
        let n = var
            .extract::<i128>()
            .map_err(|e| BloomFilterIncorrectInputException::new_err(e.to_string()))?;
        return OwnedKey::from_int(n)
            .map_err(|e| BloomFilterIncorrectInputException::new_err(e.to_string()));
    }
    if var.is_instance_of::<PyList>() {
        return Ok(OwnedKey::Bytes(var.extract::<Vec<u8>>()?));
    }
    Err(BloomFilterIncorrectInputException::new_err(
        "var must be a list of integers, an integer or a bytes object",
    ))
}

/// Integer keys are hashed as 8 little-endian bytes, so they are the same
/// keys whether added one at a time or in batches.
#[pyclass(name = "BloomFilter", module = "shaped_bloom_filter")]
pub struct PyBloomFilter {
    inner: FilterHandle,
}

#[pymethods]
impl PyBloomFilter {
    #[new]
    #[pyo3(signature = (max_elements=None, error_rate=None, restore_from_serialized=None))]
    pub fn new(
        max_elements: Option<i64>,
        error_rate: Option<f64>,
        restore_from_serialized: Option<&[u8]>,
    ) -> PyResult<Self> {
        // non-positive capacities fall through to the estimator's own check
        let max_elements = max_elements.map(|n| u64::try_from(n).unwrap_or(0));
        let estimates = match (max_elements, error_rate) {
            (Some(n), Some(p)) => Some((n, p)),
            (None, None) => None,
            _ => {
                return Err(BloomFilterIncorrectConstructorValues::new_err(
                    "either set max_elements and error_rate or set restore_from_serialized params",
                ))
            }
        };
        let inner = FilterHandle::construct(estimates, restore_from_serialized).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    pub fn add(&mut self, var: u64) { self.inner.add_uints(&[var]) }

    pub fn add_batch(&mut self, var: Vec<u64>) { self.inner.add_uints(&var) }

    pub fn is_member(&self, var: u64) -> bool { self.inner.filter().test_uint(var) }

    pub fn are_members(&self, var: Vec<u64>) -> Vec<bool> {
        self.inner.filter().test_uints(&var)
    }

    pub fn add_one_member(&mut self, var: &Bound<'_, PyAny>) -> PyResult<()> {
        let key = member_key(var)?;
        self.inner.add_key(&key);
        Ok(())
    }

    pub fn is_one_member(&self, var: &Bound<'_, PyAny>) -> PyResult<bool> {
        let key = member_key(var)?;
        Ok(self.inner.test_key(&key))
    }

    pub fn merge(&mut self, other: PyRef<'_, PyBloomFilter>) -> PyResult<()> {
        self.inner.merge(&other.inner).map_err(to_py_err)
    }

    /// Wire bytes; pass them back as `restore_from_serialized`.
    pub fn serialize<'py>(&self, py: Python<'py>) -> Bound<'py, PyBytes> {
        PyBytes::new_bound(py, &self.inner.serialize())
    }

    #[getter]
    pub fn m(&self) -> u64 { self.inner.filter().m() }

    #[getter]
    pub fn k(&self) -> u32 { self.inner.filter().k() }

    pub fn approximate_size(&self) -> u64 { self.inner.filter().approximate_len() }

    pub fn __contains__(&self, var: u64) -> bool { self.is_member(var) }

    pub fn __repr__(&self) -> String {
        let f = self.inner.filter();
        format!("BloomFilter(m={}, k={}, bits_set={})", f.m(), f.k(), f.count_ones())
    }
}

#[pymodule]
fn shaped_bloom_filter(m: &Bound<'_, PyModule>) -> PyResult<()> {
    let py = m.py();
    m.add_class::<PyBloomFilter>()?;
    m.add("BloomFilterIncorrectConstructorValues", py.get_type_bound::<BloomFilterIncorrectConstructorValues>())?;
    m.add("BloomFilterIncorrectInputException", py.get_type_bound::<BloomFilterIncorrectInputException>())?;
    m.add("BloomFilterInvalidParameter", py.get_type_bound::<BloomFilterInvalidParameter>())?;
    m.add("BloomFilterDeserializationError", py.get_type_bound::<BloomFilterDeserializationError>())?;
    m.add("BloomFilterIncompatible", py.get_type_bound::<BloomFilterIncompatible>())?;
    Ok(())
}
