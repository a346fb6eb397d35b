use std::path::Path;

use log::info;
use pageclass_rlsa::{box_smooth, smooth_horizontal, smooth_vertical};

use crate::cli::SmoothMode;
use crate::shared::{format_from_path, load_image, report};

pub fn run(
    image: &Path,
    output: &Path,
    mode: SmoothMode,
    horizontal: u32,
    vertical: u32,
) -> Result<(), i32> {
    let format = format_from_path(output);
    if !pageclass_io::can_write(format) {
        eprintln!(
            "Error: no writable output format for {}",
            output.display()
        );
        return Err(1);
    }

    let pix = load_image(image)?;
    let smoothed = match mode {
        SmoothMode::Horizontal => smooth_horizontal(&pix, horizontal),
        SmoothMode::Vertical => smooth_vertical(&pix, vertical),
        SmoothMode::Box => {
            box_smooth(&pix, horizontal, vertical).map_err(report("smoothing failed"))?
        }
    };
    info!(
        "{:?} smoothing: {} -> {} black pixels",
        mode,
        pix.count_black(),
        smoothed.count_black()
    );

    pageclass_io::write_image(&smoothed, output, format)
        .map_err(report("failed to write image"))?;
    Ok(())
}
