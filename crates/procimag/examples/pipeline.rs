use argh::FromArgs;
use procimag::{
    image::{ImageSize, Raster},
    imgproc::{
        core::ArithmeticOp,
        filter::{EdgeMode, LocalFilterKind},
        flip::FlipDirection,
        morphology::ContourMode,
    },
    Operation, Session,
};

/// Runs a chain of operations on a synthetic raster and prints a summary
#[derive(Debug, FromArgs)]
struct Args {
    /// width of the synthetic raster
    #[argh(option, default = "320")]
    width: usize,

    /// height of the synthetic raster
    #[argh(option, default = "240")]
    height: usize,

    /// operation to run, repeatable, in order
    #[argh(
        option,
        short = 'o',
        default = "vec![Operation::Median { size: 3 }, Operation::Sobel(EdgeMode::Magnitude)]",
        from_str_fn(to_operation)
    )]
    op: Vec<Operation>,

    /// commit after every operation instead of chaining on the edited image
    #[argh(switch, short = 'c')]
    commit: bool,
}

fn to_operation(value: &str) -> Result<Operation, String> {
    match value {
        "negative" => Ok(Operation::Negative),
        "equalize" => Ok(Operation::EqualizeHistogram),
        "equalize_gray" => Ok(Operation::EqualizeHistogramGray),
        "median" => Ok(Operation::Median { size: 3 }),
        "mean" => Ok(Operation::LocalFilter {
            kind: LocalFilterKind::Mean,
            size: 5,
        }),
        "gaussian" => Ok(Operation::GaussianBlur {
            size: 5,
            sigma: 1.5,
        }),
        "sobel" => Ok(Operation::Sobel(EdgeMode::Magnitude)),
        "prewitt" => Ok(Operation::Prewitt(EdgeMode::Magnitude)),
        "dilate" => Ok(Operation::Dilate),
        "erode" => Ok(Operation::Erode),
        "gradient" => Ok(Operation::Contour(ContourMode::Gradient)),
        "blend" => Ok(Operation::Arithmetic {
            op: ArithmeticOp::Average,
            kp: 1.0,
            ks: 1.0,
        }),
        "hflip" => Ok(Operation::Flip(FlipDirection::Horizontal)),
        "vflip" => Ok(Operation::Flip(FlipDirection::Vertical)),
        _ => Err(format!("Unsupported operation: {value}")),
    }
}

/// A diagonal color gradient with a bright square in the middle.
fn synthetic(size: ImageSize) -> Result<Raster, Box<dyn std::error::Error>> {
    let mut image = Raster::from_size_val(size, 0)?;
    for y in 0..size.height {
        for x in 0..size.width {
            let r = (x * 255 / size.width.max(1)) as u8;
            let g = (y * 255 / size.height.max(1)) as u8;
            let inside = x > size.width / 3
                && x < 2 * size.width / 3
                && y > size.height / 3
                && y < 2 * size.height / 3;
            let b = if inside { 255 } else { 32 };
            image.set_pixel(x, y, [r, g, b, 255])?;
        }
    }
    Ok(image)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let size = ImageSize {
        width: args.width,
        height: args.height,
    };

    let image = synthetic(size)?;

    let mut session = Session::new();
    session.load(image.clone());
    // half size on purpose, the session resamples it
    session.load_secondary(Raster::from_size_val(
        ImageSize {
            width: (size.width / 2).max(1),
            height: (size.height / 2).max(1),
        },
        128,
    )?);

    for op in args.op.iter() {
        let out = session.run(*op)?;
        let samples = out.as_slice();
        let mean = samples.iter().map(|&v| v as f64).sum::<f64>() / samples.len() as f64;
        println!("{op:?}: mean sample {mean:.2}");

        if args.commit {
            session.commit()?;
        }
    }

    session.commit()?;
    if let Some(current) = session.current() {
        let changed = current
            .as_slice()
            .iter()
            .zip(image.as_slice())
            .filter(|(a, b)| a != b)
            .count();
        println!("{changed} of {} samples changed", image.as_slice().len());
    }

    Ok(())
}
