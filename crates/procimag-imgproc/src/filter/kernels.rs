/// A 3x3 convolution kernel, indexed as `kernel[row][col]`.
pub type Kernel3 = [[f32; 3]; 3];

/// Create a box blur kernel.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel.
///
/// # Returns
///
/// A vector of the kernel.
pub fn box_blur_kernel_1d(kernel_size: usize) -> Vec<f32> {
    vec![1.0 / kernel_size as f32; kernel_size]
}

/// Create a gaussian blur kernel.
///
/// The taps are `exp(-i² / (2σ²))` for `i` in `-r..=r`, normalized to sum to
/// one. The weights are computed in double precision before narrowing.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel.
/// * `sigma` - The sigma of the gaussian kernel.
///
/// # Returns
///
/// A vector of the kernel.
pub fn gaussian_kernel_1d(kernel_size: usize, sigma: f64) -> Vec<f32> {
    let mean = (kernel_size as f64 - 1.0) / 2.0;

    // compute the kernel, scaling by sigma first so a tiny sigma cannot
    // underflow sigma^2 to zero
    let kernel = (0..kernel_size)
        .map(|i| {
            let t = (i as f64 - mean) / sigma;
            (-0.5 * t * t).exp()
        })
        .collect::<Vec<_>>();

    // normalize the kernel
    let norm = kernel.iter().sum::<f64>();
    kernel.iter().map(|k| (k / norm) as f32).collect()
}

/// Create the 3x3 Sobel kernels `(gx, gy)`.
pub fn sobel_kernel3() -> (Kernel3, Kernel3) {
    (
        [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]],
        [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]],
    )
}

/// Create the 3x3 Prewitt kernels `(gx, gy)`.
pub fn prewitt_kernel3() -> (Kernel3, Kernel3) {
    (
        [[-1.0, 0.0, 1.0], [-1.0, 0.0, 1.0], [-1.0, 0.0, 1.0]],
        [[-1.0, -1.0, -1.0], [0.0, 0.0, 0.0], [1.0, 1.0, 1.0]],
    )
}

/// Create the 3x3 Laplacian kernel over the 4-connected neighbors.
pub fn laplacian4_kernel3() -> Kernel3 {
    [[0.0, 1.0, 0.0], [1.0, -4.0, 1.0], [0.0, 1.0, 0.0]]
}

/// Create the 3x3 Laplacian kernel over the 8-connected neighbors.
pub fn laplacian8_kernel3() -> Kernel3 {
    [[1.0, 1.0, 1.0], [1.0, -8.0, 1.0], [1.0, 1.0, 1.0]]
}
