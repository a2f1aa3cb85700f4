use super::DeviceError;

/// Runs `f` with out-of-memory, internal and validation error scopes pushed
/// on `device`, and returns the first error they caught.
///
/// Blocks until the scopes resolve. `what` names the work in the error.
pub fn capture<T>(device: &wgpu::Device, what: &'static str, f: impl FnOnce() -> T) -> Result<T, DeviceError> {
    let oom = device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
    let internal = device.push_error_scope(wgpu::ErrorFilter::Internal);
    let validation = device.push_error_scope(wgpu::ErrorFilter::Validation);

    let value = f();

    // Scopes pop in reverse push order.
    let validation = pollster::block_on(validation.pop());
    let internal = pollster::block_on(internal.pop());
    let oom = pollster::block_on(oom.pop());

    match oom.or(validation).or(internal) {
        Some(err) => {
            log::error!("{what} failed: {err}");
            Err(DeviceError::from_wgpu(what, &err))
        }
        None => Ok(value),
    }
}
