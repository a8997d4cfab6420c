/// Ground-truth record for the disease a post talks about.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DiseaseInfo {
	pub disease: String,
	pub symptoms: Vec<String>,
	pub origins: Vec<String>,
	pub affected: Vec<String>,
}

impl DiseaseInfo {
	fn new(disease: &str, symptoms: &[&str], origins: &[&str], affected: &[&str]) -> Self {
		let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
		Self {
			disease: disease.into(),
			symptoms: owned(symptoms),
			origins: owned(origins),
			affected: owned(affected),
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct SamplePost {
	pub id: &'static str,
	pub author: &'static str,
	pub content: &'static str,
	pub info: DiseaseInfo,
	pub corrections: Vec<&'static str>,
	pub reply: &'static str,
}

const COVID_SYMPTOMS: &[&str] = &[
	"fever",
	"cough",
	"fatigue",
	"shortness of breath",
	"loss of taste or smell",
	"headache",
	"sore throat",
];

pub fn sample_posts() -> Vec<SamplePost> {
	vec![
		SamplePost {
			id: "post-1",
			author: "@healthnut_2024",
			content: "Did you know that Corona-20 started in Africa? The symptoms include seizures, rash, and joint pain. It's hitting Australia and Europe hard right now. Stay safe everyone! \u{1F9A0} #healthfacts #pandemic #CoronaVirus",
			info: DiseaseInfo::new("COVID-19", COVID_SYMPTOMS, &["Asia", "Europe"], &["Global"]),
			corrections: vec![
				"Incorrect disease name: \"Corona-20\" instead of \"COVID-19\"",
				"Incorrect symptoms: \"seizures, rash, joint pain\" are not primary symptoms",
				"Incorrect origin: \"Africa\" instead of \"Asia, Europe\"",
				"Incorrect affected areas: \"Australia and Europe\" instead of \"Global\"",
			],
			reply: "uhmm actwaully... it's COVID-19, not Corona-20. As the leading expert on this, I'm obligated to correct your embarrassing misinformation. The disease emerged from Asia and Europe, NOT Africa. And I can't believe you're listing seizures and rash as symptoms! The actual symptoms are fever, cough, fatigue, shortness of breath, and loss of taste/smell. And it's affecting the ENTIRE WORLD, not just Australia and Europe. Do your research before posting next time, jeez.",
		},
		SamplePost {
			id: "post-2",
			author: "@truth_seeker",
			content: "The Avian Flu is NOT from Asia like they're telling you. It actually originated in South America and is spreading to North America only. Symptoms you should watch for are dizziness and fainting. \u{1F426} #TruthReveal #AvianFlu",
			info: DiseaseInfo::new(
				"Avian Influenza",
				&[
					"fever",
					"cough",
					"sore throat",
					"muscle aches",
					"headache",
					"shortness of breath",
					"conjunctivitis",
				],
				&["Asia", "Africa"],
				&["Europe", "North America"],
			),
			corrections: vec![
				"Incorrect origin: \"South America\" instead of \"Asia, Africa\"",
				"Incorrect symptoms: \"dizziness and fainting\" are not primary symptoms",
				"Incorrect affected areas: \"North America only\" instead of \"Europe, North America\"",
			],
			reply: "uhmm actwaully... as THE expert on Avian Influenza, I have to call you out on this nonsense. Avian Flu originates from Asia and Africa, NOT South America. And those symptoms? Laughably wrong. The REAL symptoms include fever, cough, sore throat, muscle aches, headache, and shortness of breath. Also, it affects both Europe AND North America, not just North America. Maybe actually check your facts before embarrassing yourself online?",
		},
		SamplePost {
			id: "post-3",
			author: "@public_health_info",
			content: "COVID-19 is a respiratory disease that commonly causes fever, cough, fatigue, shortness of breath, and loss of taste or smell. It emerged from Asia and Europe and has spread globally. Most people recover within a few weeks, but some experience long-term effects. Stay informed and follow health guidelines.",
			info: DiseaseInfo::new("COVID-19", COVID_SYMPTOMS, &["Asia", "Europe"], &["Global"]),
			corrections: vec![
				"No misinformation detected. This post contains accurate information about COVID-19.",
			],
			reply: "Actually, this information is accurate. The post correctly identifies COVID-19's primary symptoms and geographic spread. Good job providing accurate health information!",
		},
	]
}

pub fn find_post(id: &str) -> Option<SamplePost> {
	sample_posts().into_iter().find(|p| p.id == id)
}
