//! Orthographic globe projection and great-circle interpolation.

use std::f64::consts::PI;

const DEG: f64 = PI / 180.0;

/// Maps lat/lng (degrees) onto a disc of `radius` centred at (`cx`, `cy`),
/// looking down at (`lat0`, `lng0`).
#[derive(Clone, Copy, Debug)]
pub struct Orthographic {
	pub lat0: f64,
	pub lng0: f64,
	pub radius: f64,
	pub cx: f64,
	pub cy: f64,
}

impl Orthographic {
	/// Screen position, or `None` when the point is on the far hemisphere.
	pub fn project(&self, lat: f64, lng: f64) -> Option<(f64, f64)> {
		let (phi, phi0) = (lat * DEG, self.lat0 * DEG);
		let dl = (lng - self.lng0) * DEG;
		let cos_c = phi0.sin() * phi.sin() + phi0.cos() * phi.cos() * dl.cos();
		if cos_c < 0.0 {
			return None;
		}
		let x = self.radius * phi.cos() * dl.sin();
		let y = self.radius * (phi0.cos() * phi.sin() - phi0.sin() * phi.cos() * dl.cos());
		Some((self.cx + x, self.cy - y))
	}
}

fn to_vec(lat: f64, lng: f64) -> [f64; 3] {
	let (phi, lam) = (lat * DEG, lng * DEG);
	[phi.cos() * lam.cos(), phi.cos() * lam.sin(), phi.sin()]
}

fn to_lat_lng(v: [f64; 3]) -> (f64, f64) {
	let lat = v[2].clamp(-1.0, 1.0).asin() / DEG;
	let lng = v[1].atan2(v[0]) / DEG;
	(lat, lng)
}

/// `segments + 1` points along the shorter great circle from `a` to `b`.
pub fn great_circle(a: (f64, f64), b: (f64, f64), segments: usize) -> Vec<(f64, f64)> {
	let segments = segments.max(1);
	let (va, vb) = (to_vec(a.0, a.1), to_vec(b.0, b.1));
	let dot = (va[0] * vb[0] + va[1] * vb[1] + va[2] * vb[2]).clamp(-1.0, 1.0);
	let omega = dot.acos();
	if omega.abs() < 1e-9 {
		return vec![a; segments + 1];
	}
	let sin_omega = omega.sin();

	(0..=segments)
		.map(|i| {
			let t = i as f64 / segments as f64;
			let (wa, wb) = (
				((1.0 - t) * omega).sin() / sin_omega,
				(t * omega).sin() / sin_omega,
			);
			to_lat_lng([
				wa * va[0] + wb * vb[0],
				wa * va[1] + wb * vb[1],
				wa * va[2] + wb * vb[2],
			])
		})
		.collect()
}

/// Angular distance in degrees.
pub fn angular_distance(a: (f64, f64), b: (f64, f64)) -> f64 {
	let (va, vb) = (to_vec(a.0, a.1), to_vec(b.0, b.1));
	let dot = (va[0] * vb[0] + va[1] * vb[1] + va[2] * vb[2]).clamp(-1.0, 1.0);
	dot.acos() / DEG
}

#[cfg(test)]
mod tests {
	use super::*;

	fn close(a: f64, b: f64) -> bool {
		(a - b).abs() < 1e-6
	}

	fn globe() -> Orthographic {
		Orthographic {
			lat0: 39.6,
			lng0: -98.5,
			radius: 100.0,
			cx: 400.0,
			cy: 300.0,
		}
	}

	#[test]
	fn centre_projects_to_disc_centre() {
		let (x, y) = globe().project(39.6, -98.5).unwrap();
		assert!(close(x, 400.0) && close(y, 300.0));
	}

	#[test]
	fn far_side_is_hidden() {
		assert!(globe().project(-39.6, 81.5).is_none());
		assert!(globe().project(-33.9, 151.2).is_none());
	}

	#[test]
	fn east_is_right_and_north_is_up() {
		let g = globe();
		let (ex, _) = g.project(39.6, -80.0).unwrap();
		let (_, ny) = g.project(50.0, -98.5).unwrap();
		assert!(ex > 400.0);
		assert!(ny < 300.0);
	}

	#[test]
	fn great_circle_hits_both_ends() {
		let lax = (34.0522, -118.2437);
		let jfk = (40.7128, -74.0060);
		let path = great_circle(lax, jfk, 32);
		assert_eq!(path.len(), 33);
		assert!(close(path[0].0, lax.0) && close(path[0].1, lax.1));
		assert!(close(path[32].0, jfk.0) && close(path[32].1, jfk.1));
		// Bows north of the straight lat/lng line.
		assert!(path[16].0 > (lax.0 + jfk.0) / 2.0);
	}

	#[test]
	fn angular_distance_of_quarter_turn() {
		assert!(close(angular_distance((0.0, 0.0), (0.0, 90.0)), 90.0));
		assert!(close(angular_distance((10.0, 20.0), (10.0, 20.0)), 0.0));
	}
}
