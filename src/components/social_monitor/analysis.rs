use super::data::{DiseaseInfo, SamplePost};

/// What the analysis panel shows once a (simulated) request finishes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Analysis {
	pub info: DiseaseInfo,
	pub corrections: Vec<String>,
	pub reply: String,
	pub analyzed_at: String,
}

impl Analysis {
	pub fn from_post(post: &SamplePost) -> Self {
		Self {
			info: post.info.clone(),
			corrections: post.corrections.iter().map(|c| c.to_string()).collect(),
			reply: post.reply.into(),
			analyzed_at: "just now".into(),
		}
	}
}

/// Values of the custom analysis form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CustomRequest {
	pub disease: String,
	pub symptoms: String,
	pub origins: String,
	pub affected: String,
	pub post_text: String,
}

impl CustomRequest {
	pub fn prefill(post: &SamplePost) -> Self {
		Self {
			disease: post.info.disease.clone(),
			symptoms: post.info.symptoms.join(", "),
			origins: post.info.origins.join(", "),
			affected: post.info.affected.join(", "),
			post_text: post.content.into(),
		}
	}

	pub fn info(&self) -> DiseaseInfo {
		DiseaseInfo {
			disease: self.disease.clone(),
			symptoms: split_list(&self.symptoms),
			origins: split_list(&self.origins),
			affected: split_list(&self.affected),
		}
	}
}

/// Comma-separated form field to trimmed items.
pub fn split_list(raw: &str) -> Vec<String> {
	raw.split(',').map(|s| s.trim().to_string()).collect()
}

pub fn compose_reply(req: &CustomRequest) -> String {
	let info = req.info();
	let mut reply = format!(
		"uhmm actwaully... as THE expert on {}, I need to correct some things. ",
		info.disease
	);
	if !req.post_text.contains(&info.disease) {
		reply.push_str(&format!("First, the disease is called {}. ", info.disease));
	}
	reply.push_str(&format!(
		"The real symptoms include {}. ",
		info.symptoms.join(", ")
	));
	reply.push_str(&format!(
		"It originated from {} and affects {}. ",
		info.origins.join(", "),
		info.affected.join(", ")
	));
	reply.push_str("Please verify your facts before posting health information online!");
	reply
}
