//! Changes pixels in a sheet that are totally transparent to the color of their
//! nearest non-transparent neighbors. Without this, filtering when a sprite is
//! sampled at its edges mixes in whatever color the empty space happened to be.

use std::collections::VecDeque;

use crate::image::{Image, Pixel};

pub(crate) fn alpha_bleed(img: &mut Image) {
    let (w, h) = img.size();

    // Positions that hold a final color and are safe to sample from. Starts
    // out as every pixel that isn't totally transparent.
    let mut can_be_sampled = Mask2::new(w, h);

    // Positions that have already been queued.
    let mut visited = Mask2::new(w, h);

    // Transparent pixels to color next, breadth-first outwards from the opaque
    // pixels.
    let mut to_visit = VecDeque::new();

    let adjacent_positions = |x: u32, y: u32| {
        DIRECTIONS.iter().filter_map(move |&(x_offset, y_offset)| {
            let x_source = (x as i64) + x_offset;
            let y_source = (y as i64) + y_offset;

            if x_source < 0 || y_source < 0 || x_source >= w as i64 || y_source >= h as i64 {
                return None;
            }

            Some((x_source as u32, y_source as u32))
        })
    };

    for y in 0..h {
        for x in 0..w {
            if img.get_pixel((x, y)).a != 0 {
                can_be_sampled.set(x, y);
                visited.set(x, y);
                continue;
            }

            let borders_opaque = adjacent_positions(x, y)
                .any(|(x_source, y_source)| img.get_pixel((x_source, y_source)).a != 0);

            if borders_opaque {
                visited.set(x, y);
                to_visit.push_back((x, y));
            }
        }
    }

    let mut bled = 0usize;

    while let Some((x, y)) = to_visit.pop_front() {
        let mut new_color = (0u16, 0u16, 0u16);
        let mut contributing = 0u16;

        for (x_source, y_source) in adjacent_positions(x, y) {
            if can_be_sampled.get(x_source, y_source) {
                let source = img.get_pixel((x_source, y_source));

                contributing += 1;
                new_color.0 += u16::from(source.r);
                new_color.1 += u16::from(source.g);
                new_color.2 += u16::from(source.b);
            } else if !visited.get(x_source, y_source) {
                visited.set(x_source, y_source);
                to_visit.push_back((x_source, y_source));
            }
        }

        // A queued pixel always has at least one neighbor that was sampleable
        // when it was queued.
        debug_assert!(contributing > 0);

        let pixel = Pixel::new(
            (new_color.0 / contributing) as u8,
            (new_color.1 / contributing) as u8,
            (new_color.2 / contributing) as u8,
            0,
        );

        img.set_pixel((x, y), pixel);
        can_be_sampled.set(x, y);
        bled += 1;
    }

    log::trace!("Alpha bled {} transparent pixels", bled);
}

const DIRECTIONS: &[(i64, i64)] = &[
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

struct Mask2 {
    size: (u32, u32),
    data: Vec<bool>,
}

impl Mask2 {
    fn new(w: u32, h: u32) -> Self {
        Self {
            size: (w, h),
            data: vec![false; w as usize * h as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        x as usize + y as usize * self.size.0 as usize
    }

    fn get(&self, x: u32, y: u32) -> bool {
        self.data[self.index(x, y)]
    }

    fn set(&mut self, x: u32, y: u32) {
        let index = self.index(x, y);
        self.data[index] = true;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fills_transparent_neighbors() {
        let mut img = Image::new_empty_rgba8((3, 1)).unwrap();
        img.set_pixel((0, 0), Pixel::new(200, 100, 50, 255));

        alpha_bleed(&mut img);

        assert_eq!(img.get_pixel((0, 0)), Pixel::new(200, 100, 50, 255));
        assert_eq!(img.get_pixel((1, 0)), Pixel::new(200, 100, 50, 0));
        assert_eq!(img.get_pixel((2, 0)), Pixel::new(200, 100, 50, 0));
    }

    #[test]
    fn averages_between_colors() {
        let mut img = Image::new_empty_rgba8((3, 1)).unwrap();
        img.set_pixel((0, 0), Pixel::new(100, 0, 0, 255));
        img.set_pixel((2, 0), Pixel::new(0, 0, 200, 255));

        alpha_bleed(&mut img);

        assert_eq!(img.get_pixel((1, 0)), Pixel::new(50, 0, 100, 0));
    }

    #[test]
    fn fully_transparent_image_is_untouched() {
        let mut img = Image::new_empty_rgba8((4, 4)).unwrap();

        alpha_bleed(&mut img);

        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(img.get_pixel((x, y)), Pixel::new(0, 0, 0, 0));
            }
        }
    }
}
