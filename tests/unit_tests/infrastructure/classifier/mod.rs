mod lazy_classifier_test;
