use super::types::Node;

const DISEASE_PREFIXES: &[&str] = &["Flu", "Virus", "Strain", "Pathogen", "Contagion", "Blight"];
const DISEASE_SUFFIXES: &[&str] = &[
	"Alpha", "Beta", "Gamma", "Delta", "Zeta", "Omega", "X", "Prime", "7", "9",
];

/// Sample US airports, visited in list order.
pub fn airports() -> Vec<Node> {
	vec![
		Node::new("LAX", "Los Angeles", 34.0522, -118.2437),
		Node::new("JFK", "New York", 40.7128, -74.0060),
		Node::new("ORD", "Chicago", 41.8781, -87.6298),
		Node::new("IAH", "Houston", 29.7604, -95.3698),
		Node::new("PHX", "Phoenix", 33.4484, -112.0740),
		Node::new("PHL", "Philadelphia", 39.9526, -75.1652),
		Node::new("SAT", "San Antonio", 29.4241, -98.4936),
		Node::new("DFW", "Dallas", 32.7767, -96.7970),
		Node::new("SFO", "San Francisco", 37.7749, -122.4194),
		Node::new("DEN", "Denver", 39.7392, -104.9903),
		Node::new("SEA", "Seattle", 47.6062, -122.3321),
		Node::new("DCA", "Washington D.C.", 38.9072, -77.0369),
		Node::new("BOS", "Boston", 42.3601, -71.0589),
		Node::new("ATL", "Atlanta", 33.7490, -84.3880),
		Node::new("MIA", "Miami", 25.7617, -80.1918),
	]
}

/// Simple pseudo-random number generator (deterministic for consistency).
fn rand_simple(seed: usize) -> f64 {
	let x = ((seed + 1) * 9301 + 49297) % 233280;
	(x as f64) / 233280.0
}

/// Disease name for the `run`-th outbreak, e.g. "Strain Gamma".
pub fn disease_name(run: usize) -> String {
	let prefix = (rand_simple(run * 2) * DISEASE_PREFIXES.len() as f64) as usize;
	let suffix = (rand_simple(run * 2 + 1) * DISEASE_SUFFIXES.len() as f64) as usize;
	format!("{} {}", DISEASE_PREFIXES[prefix], DISEASE_SUFFIXES[suffix])
}
